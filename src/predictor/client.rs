//! Subprocess client for the price model
//!
//! Each prediction spawns the configured program, writes a JSON request to
//! its stdin and reads the price back from stdout.

use super::traits::PredictorTrait;
use crate::config::PredictorSettings;
use crate::state::FeatureRecord;
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[derive(Serialize)]
struct PredictRequest<'a> {
    features: &'a FeatureRecord,
    artifact_path: &'a str,
    mode: &'a str,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PredictResponse {
    Bare(f64),
    Object { price: f64 },
}

/// Predictor backed by an external program
#[derive(Debug, Clone)]
pub struct CommandPredictor {
    program: String,
    args: Vec<String>,
}

impl CommandPredictor {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_settings(settings: &PredictorSettings) -> Self {
        Self::new(settings.program.clone(), settings.args.clone())
    }
}

#[async_trait]
impl PredictorTrait for CommandPredictor {
    async fn predict(
        &self,
        features: &FeatureRecord,
        artifact_path: &str,
        mode: &str,
    ) -> Result<f64> {
        if features.is_empty() {
            bail!("no features to predict from");
        }
        let request = serde_json::to_vec(&PredictRequest {
            features,
            artifact_path,
            mode,
        })?;

        tracing::debug!(program = %self.program, "spawning predictor");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to start predictor {}", self.program))?;

        // Write errors are reported only when the child exits successfully
        let write_result = match child.stdin.take() {
            Some(mut stdin) => {
                let result = stdin.write_all(&request).await;
                drop(stdin);
                result
            }
            None => Ok(()),
        };

        let output = child
            .wait_with_output()
            .await
            .context("Failed to wait for predictor")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if stderr.is_empty() {
                bail!("predictor exited with {}", output.status);
            }
            return Err(anyhow!("{stderr}"))
                .with_context(|| format!("predictor exited with {}", output.status));
        }
        write_result.context("Failed to send features to predictor")?;

        parse_price(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Read the price from predictor output.
///
/// The last non-empty line is used so that diagnostic chatter printed
/// before the result is tolerated.
fn parse_price(stdout: &str) -> Result<f64> {
    let line = stdout
        .lines()
        .map(str::trim)
        .rev()
        .find(|l| !l.is_empty())
        .ok_or_else(|| anyhow!("predictor produced no output"))?;

    let price = match serde_json::from_str::<PredictResponse>(line) {
        Ok(PredictResponse::Bare(price)) | Ok(PredictResponse::Object { price }) => price,
        Err(_) => bail!("unexpected predictor output: {line}"),
    };
    if !price.is_finite() {
        bail!("predictor returned a non-finite price");
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{extract, FormState};

    #[test]
    fn test_parse_bare_number() {
        assert_eq!(parse_price("500000.0\n").unwrap(), 500000.0);
        assert_eq!(parse_price("  412345 ").unwrap(), 412345.0);
    }

    #[test]
    fn test_parse_json_object() {
        assert_eq!(parse_price(r#"{"price": 321000.5}"#).unwrap(), 321000.5);
    }

    #[test]
    fn test_parse_uses_last_line() {
        let out = "loading model...\nwarning: old sklearn\n650000.25\n\n";
        assert_eq!(parse_price(out).unwrap(), 650000.25);
    }

    #[test]
    fn test_parse_empty_output_fails() {
        let err = parse_price("\n  \n").unwrap_err();
        assert!(err.to_string().contains("no output"));
    }

    #[test]
    fn test_parse_garbage_fails() {
        let err = parse_price("Traceback (most recent call last)").unwrap_err();
        assert!(err.to_string().contains("unexpected predictor output"));
    }

    #[test]
    fn test_request_shape() {
        let record = extract(&FormState::new()).unwrap();
        let value = serde_json::to_value(PredictRequest {
            features: &record,
            artifact_path: "models/xgb_final.pkl",
            mode: "xgb",
        })
        .unwrap();
        assert_eq!(value["artifact_path"], "models/xgb_final.pkl");
        assert_eq!(value["mode"], "xgb");
        assert_eq!(value["features"]["city"], "gdynia");
        assert_eq!(value["features"]["hasBalcony"], "no");
    }

    #[test]
    fn test_from_settings() {
        let settings = PredictorSettings::default();
        let predictor = CommandPredictor::from_settings(&settings);
        assert_eq!(predictor.program, "python3");
        assert_eq!(predictor.args, vec!["-m", "src.predict"]);
    }

    #[cfg(unix)]
    mod subprocess {
        use super::*;

        fn sh(script: &str) -> CommandPredictor {
            CommandPredictor::new("sh", vec!["-c".to_string(), script.to_string()])
        }

        #[tokio::test]
        async fn test_predict_reads_stdout() {
            let record = extract(&FormState::new()).unwrap();
            let price = sh("cat > /dev/null; echo 500000.0")
                .predict(&record, "models/xgb_final.pkl", "xgb")
                .await
                .unwrap();
            assert_eq!(price, 500000.0);
        }

        #[tokio::test]
        async fn test_predict_receives_request_on_stdin() {
            let record = extract(&FormState::new()).unwrap();
            // Echo back 1 only when the request carries the mode
            let price = sh("grep -q '\"mode\":\"xgb\"' && echo 1 || echo 0")
                .predict(&record, "models/xgb_final.pkl", "xgb")
                .await
                .unwrap();
            assert_eq!(price, 1.0);
        }

        #[tokio::test]
        async fn test_predict_failure_carries_stderr() {
            let record = extract(&FormState::new()).unwrap();
            let err = sh("cat > /dev/null; echo 'model not found' >&2; exit 3")
                .predict(&record, "missing.pkl", "xgb")
                .await
                .unwrap_err();
            assert!(format!("{err:#}").contains("model not found"));
        }

        #[tokio::test]
        async fn test_predict_missing_program() {
            let record = extract(&FormState::new()).unwrap();
            let err = CommandPredictor::new("/nonexistent/predictor-binary", vec![])
                .predict(&record, "models/xgb_final.pkl", "xgb")
                .await
                .unwrap_err();
            assert!(err.to_string().contains("Failed to start predictor"));
        }
    }
}
