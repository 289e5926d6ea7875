//! Shared support for the daemon-backed end-to-end flows.

use std::path::PathBuf;
use std::sync::Once;

use shipshape_common::fixtures::{APP_IMAGE_REPOSITORY, BASE_IMAGE_REPOSITORY, CONTAINER_PORT};
use shipshape_common::types::{BuildStage, ImageReference, TargetArchitecture};
use shipshape_image::builder::ImageBuilder;
use shipshape_runtime::container::ContainerHandle;
use shipshape_runtime::engine::{Engine, PortMapping};
use shipshape_runtime::readiness::{ReadinessPolicy, wait_until_ready};
use shipshape_runtime::resources::TestResources;

static INIT: Once = Once::new();

/// Installs the tracing subscriber once per test binary.
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    });
}

/// Root directory holding the `base/` and `application/` build contexts.
pub fn build_context_root() -> PathBuf {
    std::env::var_os("SHIPSHAPE_BUILD_CONTEXT")
        .map_or_else(|| PathBuf::from("docker"), PathBuf::from)
}

/// Builds the base server image, then the application image on top of it
/// for the given stage, and returns the application image reference.
pub async fn build_application_image(
    engine: &Engine,
    architecture: TargetArchitecture,
    stage: BuildStage,
) -> ImageReference {
    let root = build_context_root();
    let _base = ImageBuilder::new(BASE_IMAGE_REPOSITORY, root.join("base"), architecture)
        .build(engine.docker())
        .await
        .expect("base image build failed");
    ImageBuilder::new(APP_IMAGE_REPOSITORY, root.join("application"), architecture)
        .stage(stage)
        .build(engine.docker())
        .await
        .expect("application image build failed")
}

/// Runs a container from the image on freshly allocated resources and
/// waits until its HTTP surface responds.
pub async fn run_ready_container(engine: &Engine, image: &ImageReference) -> ContainerHandle {
    let resources = TestResources::allocate().expect("resource allocation failed");
    let handle = engine
        .run(
            image,
            &resources.container_name,
            PortMapping::new(CONTAINER_PORT, resources.host_port),
        )
        .await
        .expect("container run failed");
    wait_until_ready(&handle.base_url(), &ReadinessPolicy::default())
        .await
        .expect("container never became ready");
    handle
}
