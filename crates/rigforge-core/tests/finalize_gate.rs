use rigforge_core::{
    can_finalize, finalize, select_component, BuildConfig, CompatRule, Component,
    ConfiguratorError, FinalizeBlock, FinalizeVerdict, IssueSeverity, Slot,
};

fn compatible_parts() -> Vec<Component> {
    vec![
        Component::new("cpu-7600", "Ryzen 5 7600", Slot::Cpu, 3_200_000.0)
            .with_meta("socket", "AM5")
            .with_meta("tdp", 65u32),
        Component::new("mb-b650", "B650 Tomahawk", Slot::Motherboard, 3_100_000.0)
            .with_meta("socket", "AM5")
            .with_meta("ramType", "DDR5")
            .with_meta("formFactor", "ATX"),
        Component::new("ram-32", "32GB DDR5-6000", Slot::Ram, 1_600_000.0).with_meta("type", "DDR5"),
        Component::new("gpu-4070", "RTX 4070", Slot::Gpu, 9_500_000.0)
            .with_meta("tdp", 220u32)
            .with_meta("length", 300u32),
        Component::new("ssd-1tb", "1TB NVMe", Slot::Storage, 1_100_000.0),
        Component::new("case-mid", "Mid Tower", Slot::Case, 1_000_000.0)
            .with_meta("formFactor", vec!["ATX", "Micro-ATX"])
            .with_meta("maxGpuLength", 360u32),
        Component::new("psu-750", "750W Gold", Slot::Psu, 1_500_000.0).with_meta("wattage", 750u32),
    ]
}

fn build(parts: Vec<Component>) -> BuildConfig {
    parts.into_iter().fold(BuildConfig::empty(), |config, part| {
        let slot = part.slot().unwrap();
        select_component(&config, slot, Some(part)).unwrap()
    })
}

fn without(slot: Slot) -> Vec<Component> {
    compatible_parts()
        .into_iter()
        .filter(|c| !c.fits(slot))
        .collect()
}

fn replace(part: Component) -> BuildConfig {
    let slot = part.slot().unwrap();
    select_component(&build(compatible_parts()), slot, Some(part)).unwrap()
}

// ---- missing required slots ----

#[test]
fn empty_build_reports_all_six_required_slots() {
    let verdict = can_finalize(&BuildConfig::empty());
    assert!(!verdict.ok());
    assert_eq!(
        verdict,
        FinalizeVerdict::Blocked(FinalizeBlock::MissingRequired {
            missing_slots: vec![
                Slot::Cpu,
                Slot::Motherboard,
                Slot::Ram,
                Slot::Gpu,
                Slot::Storage,
                Slot::Psu,
            ],
        })
    );
}

#[test]
fn case_is_optional() {
    let verdict = can_finalize(&build(without(Slot::Case)));
    assert!(verdict.ok(), "{verdict:?}");
}

#[test]
fn missing_slots_are_all_listed() {
    let parts: Vec<Component> = compatible_parts()
        .into_iter()
        .filter(|c| !c.fits(Slot::Ram) && !c.fits(Slot::Psu))
        .collect();
    match can_finalize(&build(parts)) {
        FinalizeVerdict::Blocked(FinalizeBlock::MissingRequired { missing_slots }) => {
            assert_eq!(missing_slots, vec![Slot::Ram, Slot::Psu]);
        }
        other => panic!("expected MissingRequired, got {other:?}"),
    }
}

#[test]
fn missing_slots_take_precedence_over_errors() {
    let mut parts = without(Slot::Storage);
    parts[0] = parts[0].clone().with_meta("socket", "LGA1700");
    match can_finalize(&build(parts)) {
        FinalizeVerdict::Blocked(block) => assert_eq!(block.reason(), "missingRequired"),
        FinalizeVerdict::Ready => panic!("incomplete build must not pass"),
    }
}

// ---- compatibility errors ----

#[test]
fn compatible_build_is_ready() {
    assert_eq!(can_finalize(&build(compatible_parts())), FinalizeVerdict::Ready);
}

#[test]
fn warnings_do_not_block() {
    // draw 435W, 450W PSU → headroom warning only
    let config = replace(
        Component::new("psu-450", "450W Bronze", Slot::Psu, 600_000.0).with_meta("wattage", 450u32),
    );
    let issues = rigforge_core::evaluate(&config);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, IssueSeverity::Warning);
    assert!(can_finalize(&config).ok());
}

#[test]
fn every_error_is_listed() {
    let config = build(vec![
        compatible_parts()[0].clone().with_meta("socket", "LGA1700"),
        compatible_parts()[1].clone(),
        compatible_parts()[2].clone().with_meta("type", "DDR4"),
        compatible_parts()[3].clone(),
        compatible_parts()[4].clone(),
        compatible_parts()[5].clone(),
        Component::new("psu-450", "450W", Slot::Psu, 1.0).with_meta("wattage", 450u32),
    ]);
    match can_finalize(&config) {
        FinalizeVerdict::Blocked(FinalizeBlock::Errors { issues }) => {
            let rules: Vec<CompatRule> = issues.iter().map(|i| i.rule).collect();
            assert_eq!(rules, vec![CompatRule::CpuSocket, CompatRule::RamType]);
            assert!(issues.iter().all(|i| i.severity == IssueSeverity::Error));
        }
        other => panic!("expected Errors, got {other:?}"),
    }
}

// ---- checkout handoff ----

#[test]
fn finalize_flattens_in_slot_order() {
    let handoff = finalize(&build(compatible_parts())).unwrap();
    let ids: Vec<&str> = handoff.components.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["cpu-7600", "mb-b650", "ram-32", "gpu-4070", "ssd-1tb", "case-mid", "psu-750"]
    );
    assert_eq!(handoff.total_price, 21_000_000.0);
}

#[test]
fn finalize_refuses_incompatible_build() {
    let long_gpu = Component::new("gpu-4090", "RTX 4090", Slot::Gpu, 30_000_000.0)
        .with_meta("tdp", 450u32)
        .with_meta("length", 380u32);
    let err = finalize(&replace(long_gpu)).unwrap_err();
    match err {
        ConfiguratorError::NotFinalizable(FinalizeBlock::Errors { issues }) => {
            assert!(issues.iter().any(|i| i.rule == CompatRule::GpuClearance));
        }
        other => panic!("expected NotFinalizable, got {other:?}"),
    }
}
