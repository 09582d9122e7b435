use std::env;

pub const PROJECT_ID_ARG: &str = "projectId";
pub const COMPUTE_REGION_ARG: &str = "computeRegion";
pub const MODEL_ID_ARG: &str = "modelId";
pub const FILE_PATH_ARG: &str = "filePath";
pub const SCORE_THRESHOLD_ARG: &str = "scoreThreshold";

pub const PROJECT_ID_VAR: &str = "PROJECT_ID";
pub const REGION_NAME_VAR: &str = "REGION_NAME";
pub const ENDPOINT_VAR: &str = "AUTOML_ENDPOINT";
pub const ACCESS_TOKEN_VAR: &str = "AUTOML_ACCESS_TOKEN";

pub const DEFAULT_FILE_PATH: &str = "./resources/test.txt";
pub const DEFAULT_SCORE_THRESHOLD: &str = "0.5";
pub const DEFAULT_ENDPOINT: &str = "https://automl.googleapis.com/v1beta1";

/// Everything a `predict` invocation needs, resolved as flag > environment > default.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictConfig {
    /// Kept verbatim rather than parsed as a number, so ids like `my-project` or `007` pass through.
    pub project_id: String,
    pub compute_region: String,
    pub model_id: String,
    pub file_path: String,
    /// Accepted for compatibility with the other samples but never applied to the results.
    pub score_threshold: String,
    pub endpoint: String,
    pub access_token: Option<String>,
}

impl PredictConfig {
    pub fn from_matches(matches: &clap::ArgMatches<'_>) -> PredictConfig {
        PredictConfig::resolve(
            |name| matches.value_of(name).map(|v| v.to_owned()),
            |key| env::var(key).ok(),
        )
    }

    pub fn resolve<F, E>(flag: F, var: E) -> PredictConfig
    where
        F: Fn(&str) -> Option<String>,
        E: Fn(&str) -> Option<String>,
    {
        PredictConfig {
            project_id: flag(PROJECT_ID_ARG)
                .or_else(|| var(PROJECT_ID_VAR))
                .unwrap_or_default(),
            compute_region: flag(COMPUTE_REGION_ARG)
                .or_else(|| var(REGION_NAME_VAR))
                .unwrap_or_default(),
            model_id: flag(MODEL_ID_ARG).unwrap_or_default(),
            file_path: flag(FILE_PATH_ARG).unwrap_or_else(|| DEFAULT_FILE_PATH.to_owned()),
            score_threshold: flag(SCORE_THRESHOLD_ARG)
                .unwrap_or_else(|| DEFAULT_SCORE_THRESHOLD.to_owned()),
            endpoint: var(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned()),
            access_token: var(ACCESS_TOKEN_VAR).filter(|token| !token.is_empty()),
        }
    }
}
