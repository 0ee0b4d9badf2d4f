//! Command-line backed RoofAnalyzer
//!
//! Runs an external program (a thin wrapper around whatever hosted vision
//! model is in use), sends it a JSON request on stdin and reads the answer
//! from stdout. Keeps API keys and HTTP clients out of this workspace.

use std::io::{Cursor, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use rooftop_types::{Error, Result, RoofAnalysis};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::prompts::{build_roof_prompt, SYSTEM_PROMPT};
use super::RoofAnalyzer;
use crate::extract_json_from_response;

/// Longest image side sent to the model
pub const DEFAULT_MAX_IMAGE_SIZE: u32 = 1024;

/// Confidence assigned to replies that do not score themselves
pub const UNSCORED_CONFIDENCE: f64 = 0.9;

const MAX_TOKENS: u32 = 1000;

#[derive(Debug, Serialize)]
struct AnalysisRequest<'a> {
    system: &'a str,
    prompt: &'a str,
    image_url: String,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct AnalysisReply {
    #[serde(alias = "analysis", alias = "raw_analysis")]
    description: String,
    #[serde(default, alias = "confidence_score")]
    confidence: Option<f64>,
}

/// RoofAnalyzer that shells out to an external command
#[derive(Debug, Clone)]
pub struct CommandAnalyzer {
    program: String,
    args: Vec<String>,
    max_image_size: u32,
}

impl CommandAnalyzer {
    /// Parse a shell-style command line such as `vlm-bridge --model gpt-4o`
    pub fn from_command_line(command_line: &str, max_image_size: u32) -> Result<Self> {
        let mut parts = shell_words::split(command_line).map_err(|e| {
            Error::invalid_config(format!("analyzer command is invalid: {}", e))
        })?;
        if parts.is_empty() {
            return Err(Error::invalid_config("analyzer command is empty"));
        }
        if max_image_size == 0 {
            return Err(Error::invalid_config("max_image_size must be at least 1"));
        }
        let program = parts.remove(0);
        Ok(Self {
            program,
            args: parts,
            max_image_size,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn build_request(&self, image_path: &Path) -> Result<Vec<u8>> {
        let prompt = build_roof_prompt();
        let request = AnalysisRequest {
            system: SYSTEM_PROMPT,
            prompt: &prompt,
            image_url: encode_image_data_url(image_path, self.max_image_size)?,
            max_tokens: MAX_TOKENS,
        };
        Ok(serde_json::to_vec(&request)?)
    }
}

impl RoofAnalyzer for CommandAnalyzer {
    fn analyze(&self, image_path: &Path) -> Result<RoofAnalysis> {
        let payload = self.build_request(image_path)?;

        debug!(program = %self.program, args = ?self.args, image = %image_path.display(), "running roof analyzer");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Analysis(format!("failed to start '{}': {}", self.program, e)))?;

        // stdin is fed from its own thread while stdout drains
        let writer = child.stdin.take().map(|mut stdin| {
            std::thread::spawn(move || stdin.write_all(&payload))
        });

        let output = child
            .wait_with_output()
            .map_err(|e| Error::Analysis(format!("'{}' did not finish: {}", self.program, e)))?;

        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("could not write request to analyzer: {}", e),
                Err(_) => warn!("analyzer request writer panicked"),
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Analysis(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        parse_reply(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Turn the analyzer's stdout into a RoofAnalysis
pub fn parse_reply(stdout: &str) -> Result<RoofAnalysis> {
    let text = stdout.trim();
    if text.is_empty() {
        return Err(Error::Analysis("analyzer returned an empty response".to_string()));
    }

    let json_str = extract_json_from_response(text);
    match serde_json::from_str::<AnalysisReply>(&json_str) {
        Ok(reply) => {
            let confidence = reply.confidence.unwrap_or(UNSCORED_CONFIDENCE);
            if !(0.0..=1.0).contains(&confidence) {
                return Err(Error::Analysis(format!(
                    "analyzer confidence {} is outside [0, 1]",
                    confidence
                )));
            }
            if reply.description.trim().is_empty() {
                return Err(Error::Analysis("analyzer returned an empty description".to_string()));
            }
            Ok(RoofAnalysis {
                description: reply.description.trim().to_string(),
                confidence,
            })
        }
        Err(e) => {
            debug!("analyzer reply is not JSON ({}), using it as plain text", e);
            Ok(RoofAnalysis {
                description: text.to_string(),
                confidence: UNSCORED_CONFIDENCE,
            })
        }
    }
}

/// JPEG data URL of the image, downscaled so the longest side is at most `max_size`
pub fn encode_image_data_url(image_path: &Path, max_size: u32) -> Result<String> {
    let img = image::open(image_path)?;
    let img = if img.width() > max_size || img.height() > max_size {
        img.resize(max_size, max_size, FilterType::Triangle)
    } else {
        img
    };

    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut bytes: Vec<u8> = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)?;

    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(&bytes)))
}
