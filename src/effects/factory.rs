use crate::{
    assets::cache::ResourceCache,
    effects::{
        catalog::EffectKind,
        descriptor::EffectDescriptor,
        instance::{EffectControl, EffectInstance},
        native,
        params::ParamBag,
    },
    foundation::error::{SlideFxError, SlideFxResult},
};

/// Compiles a descriptor into a live instance.
///
/// The native baseline is built from the descriptor params first, then the descriptor's
/// intensity is applied once. Texture kinds get a placeholder-backed handle from `resources`
/// and never need to be rebuilt when the texture arrives.
pub fn create_effect(
    descriptor: &EffectDescriptor,
    resources: &mut ResourceCache,
) -> SlideFxResult<EffectInstance> {
    if !descriptor.enabled {
        return Err(SlideFxError::DisabledEffect {
            kind: descriptor.kind.clone(),
        });
    }

    let kind = EffectKind::parse(&descriptor.kind)?;
    let bag = ParamBag::new(kind.name(), &descriptor.params)?;
    let baseline = native::build(kind, &bag, resources)?;

    let mut instance = EffectInstance::new(kind, descriptor.clone(), baseline);
    instance.update_intensity(descriptor.intensity);
    tracing::debug!(kind = %kind, intensity = descriptor.intensity, "effect created");
    Ok(instance)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/factory.rs"]
mod tests;
