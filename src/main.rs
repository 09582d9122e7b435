mod api;
mod cmd;
mod config;
mod types;

use crate::cmd::predict;

use clap::{App, AppSettings, Arg, SubCommand};
use human_panic::setup_panic;
use log::info;

use types::Result;

pub fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("automl-predict")
        .version("1.0")
        .about("Classifies text with an AutoML Natural Language model")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("predict")
                .about("classify the content")
                .arg(
                    Arg::with_name(config::COMPUTE_REGION_ARG)
                        .long(config::COMPUTE_REGION_ARG)
                        .short("c")
                        .takes_value(true)
                        .help("region name e.g. \"us-central1\" [env: REGION_NAME]"),
                )
                .arg(
                    Arg::with_name(config::FILE_PATH_ARG)
                        .long(config::FILE_PATH_ARG)
                        .short("f")
                        .takes_value(true)
                        .default_value(config::DEFAULT_FILE_PATH)
                        .help("local text file path of the content to be classified"),
                )
                .arg(
                    Arg::with_name(config::MODEL_ID_ARG)
                        .long(config::MODEL_ID_ARG)
                        .short("i")
                        .takes_value(true)
                        .help("Id of the model which will be used for text classification"),
                )
                .arg(
                    Arg::with_name(config::PROJECT_ID_ARG)
                        .long(config::PROJECT_ID_ARG)
                        .short("z")
                        .takes_value(true)
                        .help("The Project ID to use [env: PROJECT_ID]"),
                )
                .arg(
                    Arg::with_name(config::SCORE_THRESHOLD_ARG)
                        .long(config::SCORE_THRESHOLD_ARG)
                        .short("s")
                        .takes_value(true)
                        .default_value(config::DEFAULT_SCORE_THRESHOLD)
                        .help("A value from 0.0 to 1.0, accepted but not applied to the results"),
                )
                .after_help(
                    "EXAMPLE:\n    automl-predict predict -i \"modelId\" -f \"./resources/test.txt\" -s \"0.5\"",
                ),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_panic!();
    pretty_env_logger::init();

    let matches = app().get_matches();

    if let Some(matches) = matches.subcommand_matches("predict") {
        let outcome = predict::run(matches).await?;
        info!("Finished with {:?}", outcome);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_predict_short_flags() {
        let matches = app()
            .get_matches_from_safe(vec![
                "automl-predict",
                "predict",
                "-i",
                "TCN42",
                "-f",
                "./snippet.txt",
            ])
            .unwrap();
        let predict = matches.subcommand_matches("predict").unwrap();
        assert_eq!(predict.value_of(config::MODEL_ID_ARG), Some("TCN42"));
        assert_eq!(predict.value_of(config::FILE_PATH_ARG), Some("./snippet.txt"));
        assert_eq!(predict.value_of(config::SCORE_THRESHOLD_ARG), Some("0.5"));
        assert_eq!(predict.value_of(config::PROJECT_ID_ARG), None);
    }

    #[test]
    fn test_predict_long_flags() {
        let matches = app()
            .get_matches_from_safe(vec![
                "automl-predict",
                "predict",
                "--projectId",
                "1234",
                "--computeRegion",
                "us-central1",
                "--modelId",
                "TCN42",
                "--scoreThreshold",
                "0.7",
            ])
            .unwrap();
        let predict = matches.subcommand_matches("predict").unwrap();
        assert_eq!(predict.value_of(config::PROJECT_ID_ARG), Some("1234"));
        assert_eq!(predict.value_of(config::COMPUTE_REGION_ARG), Some("us-central1"));
        assert_eq!(predict.value_of(config::FILE_PATH_ARG), Some("./resources/test.txt"));
        assert_eq!(predict.value_of(config::SCORE_THRESHOLD_ARG), Some("0.7"));
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(app().get_matches_from_safe(vec!["automl-predict"]).is_err());
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(app()
            .get_matches_from_safe(vec!["automl-predict", "predict", "--verbose"])
            .is_err());
    }
}
