use std::io::Read;

use crate::{
    assets::cache::normalize_rel_path,
    carousel::config::CarouselConfig,
    effects::descriptor::EffectDescriptor,
    foundation::error::{SlideFxError, SlideFxResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlideSpec {
    /// Texture path relative to the loader root.
    pub image: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default = "default_base_scale")]
    pub base_scale: f64,
}

fn default_base_scale() -> f64 {
    1.0
}

impl SlideSpec {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            title: String::new(),
            subtitle: String::new(),
            base_scale: default_base_scale(),
        }
    }

    pub fn with_caption(mut self, title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        self.title = title.into();
        self.subtitle = subtitle.into();
        self
    }
}

/// Displacement-map textures for the two pointer-coupled channels.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DisplacementMaps {
    pub background: String,
    pub cursor: String,
}

impl DisplacementMaps {
    pub(crate) fn descriptor(path: &str) -> EffectDescriptor {
        EffectDescriptor::new("displacement")
            .with_intensity(0.0)
            .with_params(serde_json::json!({ "texture": path }))
    }
}

/// Everything a carousel shows: slides, displacement maps and the declarative effect stacks
/// applied to every slide image and caption.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlideDeck {
    pub slides: Vec<SlideSpec>,
    pub displacement: DisplacementMaps,
    #[serde(default)]
    pub image_effects: Vec<EffectDescriptor>,
    #[serde(default)]
    pub caption_effects: Vec<EffectDescriptor>,
    #[serde(default)]
    pub config: CarouselConfig,
}

impl SlideDeck {
    pub fn new(slides: Vec<SlideSpec>, displacement: DisplacementMaps) -> Self {
        Self {
            slides,
            displacement,
            image_effects: Vec::new(),
            caption_effects: Vec::new(),
            config: CarouselConfig::default(),
        }
    }

    pub fn from_json_str(s: &str) -> SlideFxResult<Self> {
        let deck: Self = serde_json::from_str(s)?;
        deck.validate()?;
        Ok(deck)
    }

    pub fn from_reader(reader: impl Read) -> SlideFxResult<Self> {
        let deck: Self = serde_json::from_reader(reader)?;
        deck.validate()?;
        Ok(deck)
    }

    pub fn to_json_pretty(&self) -> SlideFxResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> SlideFxResult<()> {
        if self.slides.is_empty() {
            return Err(SlideFxError::validation("deck must contain at least one slide"));
        }
        for (i, slide) in self.slides.iter().enumerate() {
            if !slide.base_scale.is_finite() || slide.base_scale <= 0.0 {
                return Err(SlideFxError::validation(format!(
                    "slide {i} base_scale must be finite and > 0"
                )));
            }
            normalize_rel_path(&slide.image)?;
        }
        normalize_rel_path(&self.displacement.background)?;
        normalize_rel_path(&self.displacement.cursor)?;
        for d in self.image_effects.iter().chain(&self.caption_effects) {
            if d.kind.trim().is_empty() {
                return Err(SlideFxError::validation("effect kind must be non-empty"));
            }
        }
        self.config.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/deck.rs"]
mod tests;
