use std::path::Path;

use log::{info, warn};
use setlens_core::{Point2, TransformError, ViewTransform};
use setlens_overlay::io::{load_response, OverlayConfig, OverlayIoError, OverlayReport};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the file-level helpers.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Overlay(#[from] OverlayIoError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("invalid transform {input:?}: expected six comma-separated numbers sx,kx,tx,ky,sy,ty")]
    TransformSyntax { input: String },

    #[cfg(feature = "image")]
    #[error(transparent)]
    Image(#[from] ::image::ImageError),
}

/// Parse `sx,kx,tx,ky,sy,ty` into an image-to-view transform.
pub fn parse_transform(input: &str) -> Result<ViewTransform, PipelineError> {
    let syntax = || PipelineError::TransformSyntax {
        input: input.to_string(),
    };
    let values = input
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| syntax())?;
    let coeffs: [f64; 6] = values.try_into().map_err(|_| syntax())?;
    Ok(ViewTransform::from_coeffs(coeffs))
}

/// Load a response and build the full report.
///
/// Parse failures do not abort: they are recorded in `report.error`, matching
/// how the capture app keeps showing the previous photo.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip(cfg), fields(path = %response_path.display())))]
pub fn build_report(response_path: &Path, cfg: &OverlayConfig) -> OverlayReport {
    let mut report = OverlayReport::new(response_path);
    match load_response(response_path) {
        Ok(snapshot) => {
            report.set_snapshot(&snapshot, cfg);
            info!(
                "{}: {} regions, {} groups, {} rings",
                response_path.display(),
                report.regions.len(),
                report.groups.len(),
                report.rings.len()
            );
        }
        Err(err) => {
            warn!("{}: {err}", response_path.display());
            report.set_error(&err);
        }
    }
    report
}

/// Load a response and resolve one view-space tap.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(image_to_view), fields(path = %response_path.display()))
)]
pub fn hit_test_file(
    response_path: &Path,
    view_point: Point2<f64>,
    image_to_view: &ViewTransform,
) -> Result<Option<String>, PipelineError> {
    let snapshot = load_response(response_path)?;
    let label = setlens_overlay::hit_test(&snapshot, view_point, image_to_view)?;
    Ok(label.map(str::to_owned))
}

/// Load a response, render its rings and paint them onto a copy of a photo.
///
/// Returns the number of rings painted.
#[cfg(feature = "image")]
#[cfg_attr(feature = "tracing", instrument(level = "info", skip(cfg)))]
pub fn paint_file(
    response_path: &Path,
    image_path: &Path,
    out_path: &Path,
    cfg: &OverlayConfig,
) -> Result<usize, PipelineError> {
    let snapshot = load_response(response_path)?;
    let rings = setlens_overlay::render_instructions(&snapshot, &cfg.render);
    let mut img = ::image::open(image_path)?.into_rgb8();
    crate::paint::paint_rings(&mut img, &rings);
    img.save(out_path)?;
    info!("painted {} rings onto {}", rings.len(), out_path.display());
    Ok(rings.len())
}
