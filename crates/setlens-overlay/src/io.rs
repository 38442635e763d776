//! JSON configuration and report helpers for overlay runs.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use setlens_core::ViewTransform;

use crate::{
    parse_slice, render_instructions, GroupAudit, GroupMatch, Membership, OverlaySnapshot,
    ParseError, Region, RenderParams, RenderParamsError, RingInstruction,
};

#[derive(thiserror::Error, Debug)]
pub enum OverlayIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Params(#[from] RenderParamsError),
}

/// Configuration for overlay runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub render: RenderParams,
    /// Image-to-view coefficients `[sx, kx, tx, ky, sy, ty]` used for hit
    /// tests when none is given explicitly; identity when absent.
    pub transform: Option<[f64; 6]>,
    pub output_path: Option<String>,
    /// Include a [`GroupAudit`] in reports.
    pub audit: bool,
}

impl OverlayConfig {
    /// Load a JSON config from disk, rejecting invalid render settings.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, OverlayIoError> {
        let raw = fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&raw)?;
        cfg.render.validate()?;
        Ok(cfg)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), OverlayIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("overlay_report.json"))
    }

    pub fn view_transform(&self) -> ViewTransform {
        self.transform
            .map(ViewTransform::from_coeffs)
            .unwrap_or_default()
    }
}

/// Read a solver response file and parse it.
pub fn load_response(path: impl AsRef<Path>) -> Result<OverlaySnapshot, OverlayIoError> {
    let raw = fs::read(path)?;
    Ok(parse_slice(&raw)?)
}

/// Everything derived from one solver response, as written by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayReport {
    pub response_path: String,
    #[serde(default)]
    pub regions: Vec<Region>,
    #[serde(default)]
    pub groups: Vec<GroupMatch>,
    #[serde(default)]
    pub membership: Membership,
    #[serde(default)]
    pub rings: Vec<RingInstruction>,
    #[serde(default)]
    pub audit: Option<GroupAudit>,
    #[serde(default)]
    pub error: Option<String>,
}

impl OverlayReport {
    pub fn new(response_path: &Path) -> Self {
        Self {
            response_path: response_path.to_string_lossy().into_owned(),
            regions: Vec::new(),
            groups: Vec::new(),
            membership: Membership::new(),
            rings: Vec::new(),
            audit: None,
            error: None,
        }
    }

    /// Populate report fields from a parsed snapshot.
    pub fn set_snapshot(&mut self, snapshot: &OverlaySnapshot, cfg: &OverlayConfig) {
        self.regions = snapshot.regions().cloned().collect();
        self.groups = snapshot.groups().to_vec();
        self.membership = snapshot.membership().clone();
        self.rings = render_instructions(snapshot, &cfg.render);
        self.audit = cfg.audit.then(|| snapshot.audit_groups());
        self.error = None;
    }

    /// Record a failure.
    pub fn set_error(&mut self, err: &OverlayIoError) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, OverlayIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), OverlayIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
