use super::*;

#[test]
fn add_child_links_parent() {
    let mut scene = Scene::new();
    let c = scene.add_child(scene.root(), SceneNode::new(NodeRole::Container));
    let img = scene.add_child(c, SceneNode::new(NodeRole::SlideImage { index: 0 }));
    assert_eq!(scene.get(img).unwrap().parent, Some(c));
    assert_eq!(scene.children(c).collect::<Vec<_>>(), vec![img]);
    assert_eq!(scene.len(), 3);
}

#[test]
fn remove_takes_subtree_but_never_root() {
    let mut scene = Scene::new();
    let c = scene.add_child(scene.root(), SceneNode::new(NodeRole::Container));
    let cap = scene.add_child(c, SceneNode::new(NodeRole::Caption { index: 0 }));
    scene.add_child(cap, SceneNode::new(NodeRole::CaptionTitle { index: 0 }));
    scene.add_child(cap, SceneNode::new(NodeRole::CaptionSubtitle { index: 0 }));

    assert_eq!(scene.remove(scene.root()), 0);
    assert_eq!(scene.remove(c), 4);
    assert!(scene.is_empty());
    assert!(!scene.contains(cap));
}

#[test]
fn opacity_is_clamped() {
    let mut scene = Scene::new();
    let n = scene.add_child(scene.root(), SceneNode::new(NodeRole::Container));
    scene.set_opacity(n, 1.7);
    assert_eq!(scene.opacity(n), Some(1.0));
    scene.set_opacity(n, -0.2);
    assert_eq!(scene.opacity(n), Some(0.0));
}

#[test]
fn effect_list_for_missing_node_is_empty() {
    let mut scene = Scene::new();
    let n = scene.add_child(scene.root(), SceneNode::new(NodeRole::Container));
    scene.remove(n);
    assert!(scene.effects(n).is_empty());
    assert!(!scene.set_effects(n, &[]));
}
