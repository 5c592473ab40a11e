//! [`ModelTrainer`] backed by an external command.

use std::path::Path;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use gesturehub_app::ports::ModelTrainer;
use gesturehub_domain::error::HubError;
use gesturehub_domain::training::TrainingSample;

use crate::config::TrainerConfig;
use crate::error::TrainerError;

/// Writes the dataset as JSON lines, then runs the configured command with
/// the dataset path as its last argument.
pub struct ProcessTrainer {
    config: TrainerConfig,
}

impl ProcessTrainer {
    #[must_use]
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    async fn write_dataset(&self, samples: &[TrainingSample]) -> Result<(), TrainerError> {
        let path = &self.config.dataset_path;
        let io_err = |source| TrainerError::Dataset {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let mut buffer = Vec::new();
        for sample in samples {
            serde_json::to_writer(&mut buffer, sample)?;
            buffer.push(b'\n');
        }

        let mut file = tokio::fs::File::create(path).await.map_err(io_err)?;
        file.write_all(&buffer).await.map_err(io_err)?;
        file.flush().await.map_err(io_err)?;
        Ok(())
    }

    async fn run(&self, command: &str, dataset: &Path) -> Result<(), TrainerError> {
        let output = Command::new(command)
            .args(&self.config.args)
            .arg(dataset)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| TrainerError::Spawn {
                command: command.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(TrainerError::Exit {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

impl ModelTrainer for ProcessTrainer {
    async fn train(&self, samples: Vec<TrainingSample>) -> Result<(), HubError> {
        self.write_dataset(&samples).await?;
        tracing::debug!(
            samples = samples.len(),
            path = %self.config.dataset_path.display(),
            "training dataset written"
        );

        match self.config.command.as_deref() {
            Some(command) => {
                self.run(command, &self.config.dataset_path).await?;
                tracing::info!(command, "training command finished");
            }
            None => tracing::debug!("no training command configured"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(gesture: &str) -> TrainingSample {
        TrainingSample {
            hour: 21,
            weekday: 4,
            device: "light".to_string(),
            power: "on".to_string(),
            fan_mode: "unknown".to_string(),
            wind_power: "unknown".to_string(),
            color: "Warm".to_string(),
            gesture: gesture.to_string(),
        }
    }

    fn trainer(dir: &Path, command: Option<&str>, args: &[&str]) -> ProcessTrainer {
        ProcessTrainer::new(TrainerConfig {
            command: command.map(str::to_string),
            args: args.iter().map(|a| (*a).to_string()).collect(),
            dataset_path: dir.join("nested").join("train.jsonl"),
        })
    }

    #[tokio::test]
    async fn should_write_one_json_line_per_sample() {
        let dir = tempfile::tempdir().unwrap();
        let trainer = trainer(dir.path(), None, &[]);

        trainer
            .train(vec![sample("ok"), sample("thumbs_up")])
            .await
            .unwrap();

        let written = std::fs::read_to_string(dir.path().join("nested/train.jsonl")).unwrap();
        let lines: Vec<TrainingSample> = written
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines, vec![sample("ok"), sample("thumbs_up")]);
    }

    #[tokio::test]
    async fn should_write_empty_dataset_when_no_samples() {
        let dir = tempfile::tempdir().unwrap();
        let trainer = trainer(dir.path(), None, &[]);

        trainer.train(Vec::new()).await.unwrap();

        let written = std::fs::read_to_string(dir.path().join("nested/train.jsonl")).unwrap();
        assert!(written.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn should_pass_dataset_path_to_command() {
        let dir = tempfile::tempdir().unwrap();
        let trainer = trainer(dir.path(), Some("sh"), &["-c", "test -s \"$0\""]);

        trainer.train(vec![sample("ok")]).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn should_fail_when_command_exits_non_zero() {
        let dir = tempfile::tempdir().unwrap();
        let trainer = trainer(dir.path(), Some("sh"), &["-c", "echo boom >&2; exit 3"]);

        let result = trainer.train(vec![sample("ok")]).await;

        let Err(HubError::Storage(err)) = result else {
            panic!("expected storage error");
        };
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn should_fail_when_command_missing() {
        let dir = tempfile::tempdir().unwrap();
        let trainer = trainer(dir.path(), Some("gesturehub-no-such-trainer"), &[]);

        let result = trainer.train(vec![sample("ok")]).await;

        assert!(matches!(result, Err(HubError::Storage(_))));
    }
}
