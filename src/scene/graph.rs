use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::{
    assets::cache::TextureHandle,
    effects::instance::EffectHandle,
    foundation::core::{Point, Vec2},
};

new_key_type! {
    /// Arena key of a node in a [`Scene`].
    pub struct NodeId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRole {
    Root,
    Container,
    SlideImage { index: usize },
    Caption { index: usize },
    CaptionTitle { index: usize },
    CaptionSubtitle { index: usize },
}

/// Retained display properties of one node. Effect handles are opaque keys into the
/// effect manager's arena; a node never owns or points back to its effects.
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub role: NodeRole,
    pub parent: Option<NodeId>,
    pub position: Point,
    pub scale: f64,
    pub rotation_deg: f64,
    pub skew: Vec2,
    pub opacity: f64,
    pub visible: bool,
    pub texture: Option<TextureHandle>,
    pub text: Option<String>,
    effects: SmallVec<[EffectHandle; 4]>,
}

impl SceneNode {
    pub fn new(role: NodeRole) -> Self {
        Self {
            role,
            parent: None,
            position: Point::ORIGIN,
            scale: 1.0,
            rotation_deg: 0.0,
            skew: Vec2::ZERO,
            opacity: 1.0,
            visible: true,
            texture: None,
            text: None,
            effects: SmallVec::new(),
        }
    }

    pub fn with_texture(mut self, texture: TextureHandle) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn effects(&self) -> &[EffectHandle] {
        &self.effects
    }
}

#[derive(Debug)]
pub struct Scene {
    nodes: SlotMap<NodeId, SceneNode>,
    root: NodeId,
}

impl Scene {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::new(NodeRole::Root));
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn add_child(&mut self, parent: NodeId, mut node: SceneNode) -> NodeId {
        node.parent = self.nodes.contains_key(parent).then_some(parent);
        self.nodes.insert(node)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    pub fn children(&self, parent: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(move |(_, n)| n.parent == Some(parent))
            .map(|(id, _)| id)
    }

    /// Removes `id` and its subtree.
    pub fn remove(&mut self, id: NodeId) -> usize {
        if id == self.root || !self.nodes.contains_key(id) {
            return 0;
        }
        let kids: Vec<NodeId> = self.children(id).collect();
        let mut removed = kids.into_iter().map(|k| self.remove(k)).sum::<usize>();
        if self.nodes.remove(id).is_some() {
            removed += 1;
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn opacity(&self, id: NodeId) -> Option<f64> {
        self.nodes.get(id).map(|n| n.opacity)
    }

    pub fn scale(&self, id: NodeId) -> Option<f64> {
        self.nodes.get(id).map(|n| n.scale)
    }

    pub fn set_opacity(&mut self, id: NodeId, opacity: f64) {
        if let Some(n) = self.nodes.get_mut(id) {
            n.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    pub fn set_scale(&mut self, id: NodeId, scale: f64) {
        if let Some(n) = self.nodes.get_mut(id) {
            n.scale = scale;
        }
    }

    pub fn effects(&self, id: NodeId) -> &[EffectHandle] {
        self.nodes.get(id).map(|n| n.effects()).unwrap_or(&[])
    }

    /// Only the effect lifecycle manager writes effect lists.
    pub(crate) fn set_effects(&mut self, id: NodeId, handles: &[EffectHandle]) -> bool {
        match self.nodes.get_mut(id) {
            Some(n) => {
                n.effects = handles.iter().copied().collect();
                true
            }
            None => false,
        }
    }

    pub(crate) fn retain_effects(&mut self, id: NodeId, keep: impl Fn(&EffectHandle) -> bool) {
        if let Some(n) = self.nodes.get_mut(id) {
            n.effects.retain(|h| keep(h));
        }
    }

    pub(crate) fn clear_all_effects(&mut self) {
        for (_, n) in self.nodes.iter_mut() {
            n.effects.clear();
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
