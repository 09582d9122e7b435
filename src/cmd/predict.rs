use crate::api::prediction::{
    self, AutoMlClient, ClassificationResult, PredictionError, PredictionRequest,
    PredictionService,
};
use crate::cmd::util;
use crate::config::PredictConfig;
use crate::types::Result;
use console::style;
use log::{debug, error};
use std::io;
use std::path;

#[derive(Debug)]
pub enum PredictOutcome {
    Printed(usize),
    Failed(PredictionError),
}

pub fn print_results<W: io::Write>(
    results: &[ClassificationResult],
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "Prediction results:")?;
    for result in results {
        writeln!(out, "Predicted class name:  {}", result.display_name)?;
        writeln!(out, "Predicted class score:  {}", result.classification.score)?;
    }
    Ok(())
}

/// Classifies the content of `config.file_path` with the configured model.
///
/// File errors abort before the service is called. A failed remote call is logged
/// and reported as [`PredictOutcome::Failed`], never as an `Err`.
pub async fn predict<S, W>(
    config: &PredictConfig,
    service: &S,
    out: &mut W,
) -> Result<PredictOutcome>
where
    S: PredictionService + ?Sized,
    W: io::Write,
{
    let name = prediction::model_path(
        &config.project_id,
        &config.compute_region,
        &config.model_id,
    );
    let snippet = util::read_utf8_file(path::Path::new(&config.file_path)).await?;
    debug!(
        "Score threshold {} is not applied to prediction results",
        config.score_threshold
    );

    let request = PredictionRequest::text(name, snippet);
    let running = format!("{}", style("Running prediction...").dim().white());
    match util::with_spinner(service.predict(&request), running).await {
        Ok(results) => {
            print_results(&results, out)?;
            Ok(PredictOutcome::Printed(results.len()))
        }
        Err(err) => {
            error!("{}", err);
            Ok(PredictOutcome::Failed(err))
        }
    }
}

pub async fn run(matches: &clap::ArgMatches<'_>) -> Result<PredictOutcome> {
    let config = PredictConfig::from_matches(matches);
    let client = AutoMlClient::new(&config.endpoint, config.access_token.clone());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    predict(&config, &client, &mut out).await
}
