//! Daemon-side image builds.
//!
//! Wraps the build endpoint of the container runtime: applies the target
//! platform and build stage, streams build progress into tracing, and
//! returns the tagged image reference on success.

use std::path::PathBuf;

use bollard::Docker;
use bollard::image::BuildImageOptions;
use futures_util::StreamExt;
use shipshape_common::error::{Result, ShipshapeError};
use shipshape_common::types::{BuildStage, ImageReference, TargetArchitecture};

use crate::context;

/// Configures and runs a single image build.
#[derive(Debug, Clone)]
pub struct ImageBuilder {
    repository: String,
    context_dir: PathBuf,
    architecture: TargetArchitecture,
    dockerfile: String,
    stage: Option<BuildStage>,
}

impl ImageBuilder {
    /// Creates a builder for the given repository, build context, and
    /// target architecture.
    #[must_use]
    pub fn new(
        repository: impl Into<String>,
        context_dir: impl Into<PathBuf>,
        architecture: TargetArchitecture,
    ) -> Self {
        Self {
            repository: repository.into(),
            context_dir: context_dir.into(),
            architecture,
            dockerfile: "Dockerfile".to_string(),
            stage: None,
        }
    }

    /// Overrides the Dockerfile name within the build context.
    #[must_use]
    pub fn dockerfile(mut self, name: impl Into<String>) -> Self {
        self.dockerfile = name.into();
        self
    }

    /// Selects a target stage of a multi-stage build.
    ///
    /// Without a stage the final stage of the Dockerfile is built, as for
    /// the base image.
    #[must_use]
    pub const fn stage(mut self, stage: BuildStage) -> Self {
        self.stage = Some(stage);
        self
    }

    /// Returns the tag the built image will carry.
    #[must_use]
    pub fn tag(&self) -> String {
        let variant = self.stage.map_or("latest", BuildStage::as_str);
        format!(
            "{}:{}-{}",
            self.repository,
            variant,
            self.architecture.slug()
        )
    }

    /// Packs the build context and runs the build on the daemon.
    ///
    /// Progress lines from the build stream are forwarded to tracing at
    /// debug level; the first error reported on the stream aborts the
    /// build.
    ///
    /// # Errors
    ///
    /// Returns an error if the context cannot be packed, the daemon call
    /// fails, or the build stream reports a failure.
    pub async fn build(&self, docker: &Docker) -> Result<ImageReference> {
        let tag = self.tag();
        tracing::info!(
            tag = %tag,
            platform = %self.architecture.platform(),
            stage = ?self.stage,
            context = %self.context_dir.display(),
            "building image"
        );

        let packed = context::pack_context(&self.context_dir)?;
        let options = BuildImageOptions {
            dockerfile: self.dockerfile.clone(),
            t: tag.clone(),
            target: self.stage.map_or_else(String::new, |s| s.as_str().to_string()),
            platform: self.architecture.platform().to_string(),
            rm: true,
            ..Default::default()
        };

        let mut stream = docker.build_image(options, None, Some(packed.into()));
        while let Some(message) = stream.next().await {
            let info = message.map_err(|e| ShipshapeError::Daemon {
                operation: "image build",
                message: e.to_string(),
            })?;
            if let Some(line) = info.stream {
                let line = line.trim_end();
                if !line.is_empty() {
                    tracing::debug!(tag = %tag, "{line}");
                }
            }
            if let Some(error) = info.error {
                return Err(ShipshapeError::Build { message: error });
            }
        }

        tracing::info!(tag = %tag, "image built");
        Ok(ImageReference::new(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_without_stage_uses_latest() {
        let builder = ImageBuilder::new("base-image", "/ctx", TargetArchitecture::Amd64);
        assert_eq!(builder.tag(), "base-image:latest-amd64");
    }

    #[test]
    fn tag_carries_stage_and_architecture_slug() {
        let builder = ImageBuilder::new("app-image", "/ctx", TargetArchitecture::Arm64V8)
            .stage(BuildStage::ProductionImageJsonLogging);
        assert_eq!(
            builder.tag(),
            "app-image:production-image-json-logging-arm64v8"
        );
    }

    #[test]
    fn dockerfile_name_can_be_overridden() {
        let builder = ImageBuilder::new("app-image", "/ctx", TargetArchitecture::Amd64)
            .dockerfile("Dockerfile.ci");
        assert_eq!(builder.dockerfile, "Dockerfile.ci");
    }

    #[tokio::test]
    async fn build_with_missing_context_fails_before_daemon_call() {
        let docker = Docker::connect_with_local_defaults().expect("client");
        let builder = ImageBuilder::new(
            "app-image",
            "/nonexistent/build-context",
            TargetArchitecture::Amd64,
        );
        let err = builder.build(&docker).await.expect_err("should fail");
        assert!(matches!(err, ShipshapeError::NotFound { .. }));
    }
}
