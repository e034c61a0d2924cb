use std::collections::HashSet;

use super::*;

#[test]
fn every_kind_parses_from_its_canonical_name() {
    for kind in EffectKind::ALL {
        assert_eq!(EffectKind::parse(kind.name()).unwrap(), kind);
    }
}

#[test]
fn names_are_unique() {
    let names: HashSet<_> = EffectKind::ALL.iter().map(|k| k.name()).collect();
    assert_eq!(names.len(), EffectKind::ALL.len());
}

#[test]
fn parse_ignores_case_and_separators() {
    assert_eq!(EffectKind::parse("RGB_Split").unwrap(), EffectKind::RgbSplit);
    assert_eq!(EffectKind::parse(" motionBlur ").unwrap(), EffectKind::MotionBlur);
    assert_eq!(EffectKind::parse("pinch").unwrap(), EffectKind::BulgePinch);
    assert_eq!(
        EffectKind::parse("simple-lightmap").unwrap(),
        EffectKind::LightMap
    );
}

#[test]
fn unknown_kind_is_unsupported() {
    let err = EffectKind::parse("warp-drive").unwrap_err();
    assert!(matches!(err, SlideFxError::UnsupportedKind(ref k) if k == "warp-drive"));
    assert!(matches!(
        EffectKind::parse("  ").unwrap_err(),
        SlideFxError::Validation(_)
    ));
}

#[test]
fn classification_covers_all_four_patterns() {
    let patterns: HashSet<_> = EffectKind::ALL
        .iter()
        .map(|k| k.intensity_pattern())
        .collect();
    assert_eq!(patterns.len(), 4);
    assert_eq!(
        EffectKind::BulgePinch.intensity_pattern(),
        IntensityPattern::SignedBipolar
    );
    assert_eq!(
        EffectKind::Vintage.intensity_pattern(),
        IntensityPattern::Composite
    );
}

#[test]
fn texture_kinds_are_mapping_lighting_or_distortion() {
    for kind in EffectKind::ALL.iter().filter(|k| k.uses_texture()) {
        assert!(matches!(
            kind.family(),
            EffectFamily::Mapping | EffectFamily::Lighting | EffectFamily::Distortion
        ));
    }
}
