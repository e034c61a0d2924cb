use std::collections::BTreeMap;

use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::{
    assets::cache::ResourceCache,
    effects::{
        descriptor::EffectDescriptor,
        factory::create_effect,
        instance::{EffectControl, EffectHandle, EffectInstance},
    },
    foundation::error::{SlideFxError, SlideFxResult},
    scene::graph::{NodeId, Scene},
};

/// One custom effect applied to a target.
#[derive(Clone, Debug, PartialEq)]
pub struct AppliedEffect {
    pub node: NodeId,
    pub handle: EffectHandle,
    pub descriptor: EffectDescriptor,
}

#[derive(Clone, Debug)]
struct TargetEntry {
    node: NodeId,
    effects: Vec<AppliedEffect>,
}

/// Outcome of one [`EffectLifecycleManager::apply`] call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApplyReport {
    /// Handles now on the node, base effects first.
    pub stack: Vec<EffectHandle>,
    pub created: usize,
    pub skipped_disabled: usize,
    /// `(kind, error)` for each descriptor that failed to compile.
    pub failed: Vec<(String, String)>,
}

/// Sole owner of node effect lists and of every live effect instance.
///
/// Instances live in an arena keyed by [`EffectHandle`]; nodes only hold those keys. Each
/// named target has at most one entry, and replacing or removing it disposes every instance
/// it created.
#[derive(Debug, Default)]
pub struct EffectLifecycleManager {
    instances: SlotMap<EffectHandle, EffectInstance>,
    entries: BTreeMap<String, TargetEntry>,
    bases: SmallVec<[EffectHandle; 2]>,
    disposed: bool,
}

impl EffectLifecycleManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the effect stack of `target` on `node` with `base ++ descriptors`.
    ///
    /// Any previous entry for `target` is disposed first. Disabled descriptors are skipped,
    /// and a descriptor that fails to compile is logged and skipped without affecting the
    /// rest of the batch.
    #[tracing::instrument(skip_all, fields(target_id = target, descriptors = descriptors.len()))]
    pub fn apply(
        &mut self,
        scene: &mut Scene,
        resources: &mut ResourceCache,
        target: &str,
        node: NodeId,
        descriptors: &[EffectDescriptor],
        base: &[EffectHandle],
    ) -> SlideFxResult<ApplyReport> {
        if self.disposed {
            return Err(SlideFxError::validation("effect manager is disposed"));
        }
        if target.trim().is_empty() {
            return Err(SlideFxError::validation("effect target id must be non-empty"));
        }
        if !scene.contains(node) {
            return Err(SlideFxError::validation(format!(
                "effect target '{target}' refers to a node that is not in the scene"
            )));
        }

        self.dispose_entry(scene, target);

        let mut report = ApplyReport::default();
        for &h in base {
            if self.instances.contains_key(h) {
                report.stack.push(h);
            } else {
                tracing::warn!(target_id = target, "ignoring unknown base effect handle");
            }
        }

        let mut effects = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            if !descriptor.enabled {
                report.skipped_disabled += 1;
                continue;
            }
            match create_effect(descriptor, resources) {
                Ok(instance) => {
                    let handle = self.instances.insert(instance);
                    report.stack.push(handle);
                    effects.push(AppliedEffect {
                        node,
                        handle,
                        descriptor: descriptor.clone(),
                    });
                }
                Err(e) => {
                    tracing::warn!(target_id = target, kind = %descriptor.kind, error = %e, "skipping effect");
                    report.failed.push((descriptor.kind.clone(), e.to_string()));
                }
            }
        }

        report.created = effects.len();
        scene.set_effects(node, &report.stack);
        self.entries
            .insert(target.to_string(), TargetEntry { node, effects });
        tracing::debug!(target_id = target, created = report.created, "effects applied");
        Ok(report)
    }

    /// Disposes and detaches the effects of `target`. Returns false when there was none.
    pub fn remove(&mut self, scene: &mut Scene, target: &str) -> bool {
        let Some(node) = self.dispose_entry(scene, target) else {
            return false;
        };
        scene.set_effects(node, &[]);
        true
    }

    fn dispose_entry(&mut self, scene: &mut Scene, target: &str) -> Option<NodeId> {
        let entry = self.entries.remove(target)?;
        let handles: SmallVec<[EffectHandle; 8]> = entry.effects.iter().map(|e| e.handle).collect();
        for h in &handles {
            if let Some(mut instance) = self.instances.remove(*h) {
                instance.dispose();
            }
        }
        scene.retain_effects(entry.node, |h| !handles.contains(h));
        tracing::debug!(target_id = target, disposed = handles.len(), "effects disposed");
        Some(entry.node)
    }

    /// `active` re-applies each descriptor's intensity; inactive resets to the baseline.
    pub fn update_intensities(&mut self, target: &str, active: bool) -> bool {
        let Some(entry) = self.entries.get(target) else {
            return false;
        };
        for applied in &entry.effects {
            let Some(instance) = self.instances.get_mut(applied.handle) else {
                continue;
            };
            if active {
                instance.update_intensity(applied.descriptor.intensity);
            } else {
                instance.reset();
            }
        }
        true
    }

    /// Registers a manager-owned effect shared across targets, such as a displacement layer.
    pub fn register_base(&mut self, instance: EffectInstance) -> SlideFxResult<EffectHandle> {
        if self.disposed {
            return Err(SlideFxError::validation("effect manager is disposed"));
        }
        let handle = self.instances.insert(instance);
        self.bases.push(handle);
        Ok(handle)
    }

    pub fn base_handles(&self) -> &[EffectHandle] {
        &self.bases
    }

    pub fn instance(&self, handle: EffectHandle) -> Option<&EffectInstance> {
        self.instances.get(handle)
    }

    pub fn instance_mut(&mut self, handle: EffectHandle) -> Option<&mut EffectInstance> {
        self.instances.get_mut(handle)
    }

    /// Steps every time-varying instance by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        for (_, instance) in self.instances.iter_mut() {
            if instance.kind().is_time_varying() {
                instance.advance(dt);
            }
        }
    }

    pub fn entry(&self, target: &str) -> Option<&[AppliedEffect]> {
        self.entries.get(target).map(|e| e.effects.as_slice())
    }

    pub fn node_of(&self, target: &str) -> Option<NodeId> {
        self.entries.get(target).map(|e| e.node)
    }

    pub fn handles_for(&self, target: &str) -> Vec<EffectHandle> {
        self.entry(target)
            .map(|es| es.iter().map(|e| e.handle).collect())
            .unwrap_or_default()
    }

    pub fn targets(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Live instances, base effects included.
    pub fn live_count(&self) -> usize {
        self.instances.len()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Disposes every instance and empties every node effect list. Idempotent.
    pub fn dispose(&mut self, scene: &mut Scene) {
        if self.disposed {
            return;
        }
        for (_, instance) in self.instances.iter_mut() {
            instance.dispose();
        }
        let count = self.instances.len();
        self.instances.clear();
        self.entries.clear();
        self.bases.clear();
        scene.clear_all_effects();
        self.disposed = true;
        tracing::debug!(instances = count, "effect manager disposed");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/manager.rs"]
mod tests;
