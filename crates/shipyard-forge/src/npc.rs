//! NPC render colors: the average visible color of each kind's textures.

use crate::error::ForgeError;
use image::{DynamicImage, RgbaImage};
use shipyard_db::{DbError, NpcDatabase, Rgb};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const TEXTURE_EXTENSION: &str = "png";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NpcReport {
    /// `(kind, color)` in database order, humans first.
    pub annotated: Vec<(String, Rgb)>,
}

fn io_error(path: &Path) -> impl Fn(std::io::Error) -> DbError + '_ {
    move |e| DbError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

/// Stem → path of every `.png` under `root`; the first one found in a sorted
/// walk wins.
fn index_textures(root: &Path) -> Result<BTreeMap<String, PathBuf>, DbError> {
    let mut index = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&dir).map_err(io_error(&dir))? {
            entries.push(entry.map_err(io_error(&dir))?.path());
        }
        entries.sort();
        let mut subdirs = Vec::new();
        for path in entries {
            if path.is_dir() {
                subdirs.push(path);
                continue;
            }
            let is_texture = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(TEXTURE_EXTENSION));
            if !is_texture {
                continue;
            }
            let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            index.entry(stem).or_insert(path);
        }
        // Depth-first in name order.
        pending.extend(subdirs.into_iter().rev());
    }
    Ok(index)
}

fn to_rgba(image: DynamicImage) -> RgbaImage {
    match image {
        DynamicImage::ImageRgba8(img) => img,
        other => other.to_rgba8(),
    }
}

fn load_texture(path: &Path) -> Result<RgbaImage, ForgeError> {
    let image = image::open(path).map_err(|e| ForgeError::Image {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(to_rgba(image))
}

/// Mean RGB over every pixel with non-zero alpha, rounded to nearest.
/// `None` when no pixel is visible.
pub fn average_color(images: &[RgbaImage]) -> Option<Rgb> {
    let mut sums = [0u64; 3];
    let mut count = 0u64;
    for pixel in images.iter().flat_map(|image| image.pixels()) {
        let [r, g, b, a] = pixel.0;
        if a == 0 {
            continue;
        }
        sums[0] += u64::from(r);
        sums[1] += u64::from(g);
        sums[2] += u64::from(b);
        count += 1;
    }
    if count == 0 {
        return None;
    }
    let mean = |sum: u64| ((sum + count / 2) / count) as u8;
    Some(Rgb::new(mean(sums[0]), mean(sums[1]), mean(sums[2])))
}

/// Set `render_color` on every human and furniture kind from its textures
/// under `texture_root`.
pub fn annotate_render_colors(
    db: &mut NpcDatabase,
    texture_root: &Path,
) -> Result<NpcReport, ForgeError> {
    let textures = index_textures(texture_root)?;
    tracing::debug!(root = %texture_root.display(), textures = textures.len(), "indexed textures");

    let mut report = NpcReport::default();
    for kind in db.kinds_mut() {
        let label = kind.label();
        let mut images = Vec::new();
        for stem in kind.texture_stems() {
            let path = textures
                .get(stem)
                .ok_or_else(|| ForgeError::TextureNotFound {
                    kind: label.clone(),
                    stem: stem.to_string(),
                    root: texture_root.display().to_string(),
                })?;
            images.push(load_texture(path)?);
        }
        let color = average_color(&images).ok_or_else(|| ForgeError::EmptyTexture(label.clone()))?;
        if kind.render_color() != Some(color.to_hex().as_str()) {
            tracing::info!(kind = %label, color = %color, "render color");
        }
        kind.set_render_color(color.to_hex());
        report.annotated.push((label, color));
    }
    Ok(report)
}
