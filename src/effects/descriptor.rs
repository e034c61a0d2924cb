use crate::effects::intensity::DEFAULT_LEVEL;

/// Declarative description of one effect. Plain data: the factory compiles it into a live
/// [`EffectInstance`](crate::EffectInstance) and never mutates it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffectDescriptor {
    pub kind: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_intensity")]
    pub intensity: f64,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub params: serde_json::Value,
}

fn default_enabled() -> bool {
    true
}

fn default_intensity() -> f64 {
    DEFAULT_LEVEL
}

impl EffectDescriptor {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            enabled: true,
            intensity: DEFAULT_LEVEL,
            params: serde_json::Value::Null,
        }
    }

    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.params = params;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}
