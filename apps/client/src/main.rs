mod api;
mod config;
mod controller;
mod errors;
mod models;
mod render;
mod session;
mod skills;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::HttpRoadmapApi;
use crate::config::Config;
use crate::controller::RoadmapController;
use crate::errors::NoticeKind;
use crate::models::resume::ResumeFile;
use crate::render::assessment::renderer_for;
use crate::render::page::render_page;
use crate::render::AssessmentRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Pathfinder client v{}", env!("CARGO_PKG_VERSION"));

    let api = Arc::new(HttpRoadmapApi::new(&config.api_url, config.request_timeout)?);
    info!("Backend: {}", config.api_url);

    let renderer: Arc<dyn AssessmentRenderer> = Arc::from(renderer_for(&config.assessment_view));
    info!("Assessment view: {}", renderer.name());

    let controller = RoadmapController::new(api, renderer);
    drive(&controller, &config).await;

    let page = render_page(&controller.view());
    tokio::fs::write(&config.output_path, page)
        .await
        .with_context(|| format!("Failed to write {}", config.output_path.display()))?;

    for notice in controller.take_notices() {
        match notice.kind {
            NoticeKind::Warning => warn!("{}", notice.text),
            NoticeKind::Success => info!("{}", notice.text),
        }
    }
    info!(
        "Reached stage {:?}; page written to {}",
        controller.stage(),
        config.output_path.display()
    );

    Ok(())
}

/// Walks the controller through the same steps a user would take. Every
/// failure is already recorded as a notice, so steps only gate what follows.
async fn drive(controller: &RoadmapController, config: &Config) {
    if let Some(path) = &config.resume_path {
        match ResumeFile::from_path(path).await {
            Ok(file) => {
                if controller.select_resume(file).await.is_ok() {
                    let _ = controller.extract_skills().await;
                }
            }
            Err(e) => warn!("Could not read resume {}: {e}", path.display()),
        }
    }

    if let Some(skills) = &config.skills {
        let _ = controller.add_skills(skills).await;
    }

    if controller
        .select_role(config.target_role.slug())
        .await
        .is_ok()
    {
        let _ = controller.generate_roadmap().await;
    }
}
