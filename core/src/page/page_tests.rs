//! Render pass scenarios for the results page
//!
//! Sessions are built from in-memory snapshots; lazily loaded views come from
//! a counting fetcher so tests can see exactly how often a view was fetched.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use baras_report_types::{
    AlertLevel, BossInfo, CastEfficiencyRow, CharacterProfile, ChangelogEntry, Combatant, Content,
    CoreTab, FightInfo, Importance, ReportConfig, Role, Spec, SpellCategory, Statistic, Suggestion,
    TabId,
};

use super::{AD_FORMAT, PageRequest, ResultsPage};
use crate::error::ReportError;
use crate::loader::{FetchFuture, ViewFetcher};
use crate::snapshot::{ReportSnapshot, SnapshotSession, SnapshotTab};
use crate::views::{SharedView, StaticView, ViewKey};

// ─────────────────────────────────────────────────────────────────────────────
// Fixtures
// ─────────────────────────────────────────────────────────────────────────────

fn make_combatant(role: Role) -> Combatant {
    let (class_name, spec_name) = match role {
        Role::Healer => ("Paladin", "Holy"),
        Role::Tank => ("Warrior", "Protection"),
        Role::Dps => ("Mage", "Fire"),
    };
    Combatant {
        id: 42,
        name: "Testplayer".to_string(),
        spec: Spec {
            class_name: class_name.to_string(),
            spec_name: spec_name.to_string(),
            role,
        },
    }
}

fn make_category(key: &str, label: &str) -> SpellCategory {
    SpellCategory {
        key: key.to_string(),
        label: label.to_string(),
    }
}

fn make_row(ability_id: u64, name: &str, category: &str, efficiency: f64) -> CastEfficiencyRow {
    CastEfficiencyRow {
        ability_id,
        name: name.to_string(),
        category: category.to_string(),
        casts: 8,
        max_casts: 10,
        efficiency,
        recommended_efficiency: Some(0.8),
        cooldown_ms: Some(45_000),
    }
}

fn make_snapshot(role: Role) -> ReportSnapshot {
    ReportSnapshot {
        fight: FightInfo {
            id: 4,
            name: "Heroic Zul".to_string(),
            boss_id: 2145,
            start_ms: 1_000,
            end_ms: 306_000,
            kill: true,
        },
        boss: Some(BossInfo {
            id: 2145,
            name: "Zul, Reborn".to_string(),
            results_warning: None,
        }),
        combatants: vec![make_combatant(role)],
        selected_combatant: 42,
        statistics: vec![Statistic {
            label: "Active time".to_string(),
            value: "87%".to_string(),
            tooltip: None,
            position: 0,
        }],
        downtime_adjusted_statistics: Some(vec![Statistic {
            label: "Active time".to_string(),
            value: "96%".to_string(),
            tooltip: None,
            position: 0,
        }]),
        issues: vec![
            Suggestion {
                importance: Importance::Minor,
                text: "Use your cooldowns more often".to_string(),
                actual: None,
                recommended: None,
            },
            Suggestion {
                importance: Importance::Major,
                text: "You died to avoidable damage".to_string(),
                actual: Some("2 deaths".to_string()),
                recommended: Some("0 deaths".to_string()),
            },
        ],
        checklist: Some(Content::text("checklist body")),
        character_panel: Some(Content::text("character panel")),
        encounter_panel: Some(Content::text("encounter panel")),
        cast_efficiency: Some(vec![
            make_row(1, "Holy Shock", "rotational", 0.9),
            make_row(2, "Avenging Wrath", "cooldowns", 0.5),
            make_row(3, "Mystery Button", "unlisted", 1.0),
        ]),
        spell_categories: Some(vec![
            make_category("rotational", "Rotational Spell"),
            make_category("cooldowns", "Cooldown"),
            make_category("utility", "Utility"),
        ]),
        tabs: vec![
            SnapshotTab {
                id: TabId::from("mana-efficiency"),
                label: "Mana efficiency".to_string(),
                content: Content::text("mana efficiency tab"),
            },
            SnapshotTab {
                id: TabId::from("statistics"),
                label: "Shadowed".to_string(),
                content: Content::text("must never render"),
            },
        ],
        views: BTreeMap::from([("timeline".to_string(), Content::text("timeline body"))]),
        changelog: vec![ChangelogEntry {
            date: "2018-12-01".to_string(),
            text: "Added checklist".to_string(),
            contributors: vec!["Zerotorescue".to_string()],
        }],
    }
}

/// Serves any view after a short delay, failing the first `failures` fetches
#[derive(Clone)]
struct CountingFetcher {
    calls: Arc<AtomicU32>,
    failures: u32,
}

impl CountingFetcher {
    fn new(failures: u32) -> Self {
        Self {
            calls: Arc::new(AtomicU32::new(0)),
            failures,
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ViewFetcher<ViewKey, SharedView> for CountingFetcher {
    fn fetch(&self, key: &ViewKey) -> FetchFuture<SharedView> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let failures = self.failures;
        let body = Content::text(format!("{} view body", key));
        Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            if call <= failures {
                Err("network error".to_string())
            } else {
                Ok(StaticView::shared(body))
            }
        })
    }
}

fn make_page_with(
    snapshot: ReportSnapshot,
    config: ReportConfig,
    fetcher: CountingFetcher,
) -> ResultsPage<SnapshotSession> {
    let session = SnapshotSession::from_snapshot(snapshot).unwrap();
    let resident = session.resident_views();
    ResultsPage::new(Arc::new(session), config, fetcher, resident)
}

fn make_page(role: Role) -> (ResultsPage<SnapshotSession>, CountingFetcher) {
    let fetcher = CountingFetcher::new(0);
    let page = make_page_with(make_snapshot(role), ReportConfig::default(), fetcher.clone());
    (page, fetcher)
}

fn page_children(page: &Content) -> &[Content] {
    match page {
        Content::Page { children, .. } => children,
        other => panic!("expected page, got {:?}", other),
    }
}

fn has_view(tree: &Content, name: &str) -> bool {
    tree.contains(&|c| matches!(c, Content::View { view, .. } if view == name))
}

fn has_loading(tree: &Content, name: &str) -> bool {
    tree.contains(&|c| matches!(c, Content::Loading { view } if view == name))
}

fn has_text(tree: &Content, needle: &str) -> bool {
    tree.contains(&|c| matches!(c, Content::Text { text } if text.contains(needle)))
}

fn has_ad(tree: &Content) -> bool {
    tree.contains(&|c| matches!(c, Content::Ad { .. }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tab Resolution
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_no_selected_tab_renders_overview() {
    let (page, _) = make_page(Role::Dps);
    let tree = page.render(&PageRequest::default()).unwrap();

    assert!(tree.contains(&|c| matches!(c, Content::Panel { title, .. } if title == "Checklist")));
    match &page_children(&tree)[0] {
        Content::Header(header) => {
            let active: Vec<_> = header.tabs.iter().filter(|t| t.active).collect();
            assert_eq!(active.len(), 1);
            assert_eq!(active[0].id.as_str(), "overview");
        }
        other => panic!("expected header first, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_contributed_tab_renders_descriptor() {
    let (page, _) = make_page(Role::Dps);
    let tree = page.render(&PageRequest::tab("mana-efficiency")).unwrap();
    assert!(has_text(&tree, "mana efficiency tab"));
    assert!(!has_text(&tree, "checklist body"));
}

#[tokio::test(start_paused = true)]
async fn test_builtin_wins_over_shadowing_contributed_tab() {
    let (page, _) = make_page(Role::Dps);
    let tree = page.render(&PageRequest::tab(CoreTab::Statistics)).unwrap();
    assert!(!has_text(&tree, "must never render"));
    assert!(tree.contains(&|c| matches!(c, Content::CastEfficiency { .. })));

    // The shadowed tab is not offered in navigation either
    let Content::Header(header) = &page_children(&tree)[0] else {
        panic!("expected header");
    };
    assert_eq!(header.tabs.iter().filter(|t| t.id.as_str() == "statistics").count(), 1);
    assert!(header.tabs.iter().any(|t| t.id.as_str() == "mana-efficiency"));
}

#[tokio::test(start_paused = true)]
async fn test_unknown_tab_falls_back_to_overview() {
    let (page, _) = make_page(Role::Dps);
    let tree = page.render(&PageRequest::tab("removed-module-tab")).unwrap();
    assert!(has_text(&tree, "checklist body"));
}

#[tokio::test(start_paused = true)]
async fn test_unknown_tab_is_error_when_strict() {
    let config = ReportConfig {
        strict_tab_resolution: true,
        ..Default::default()
    };
    let page = make_page_with(make_snapshot(Role::Dps), config, CountingFetcher::new(0));
    let err = page.render(&PageRequest::tab("removed-module-tab")).unwrap_err();
    assert!(matches!(err, ReportError::TabNotFound { .. }));
}

// ─────────────────────────────────────────────────────────────────────────────
// Overview
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_overview_orders_suggestions_by_importance() {
    let (page, _) = make_page(Role::Dps);
    let tree = page.render(&PageRequest::tab(CoreTab::Overview)).unwrap();
    let issues = tree
        .find(&|c| matches!(c, Content::Suggestions { .. }))
        .unwrap();
    let Content::Suggestions { issues } = issues else {
        unreachable!()
    };
    assert_eq!(issues[0].importance, Importance::Major);
    assert_eq!(issues[1].importance, Importance::Minor);
}

#[tokio::test(start_paused = true)]
async fn test_missing_checklist_renders_contribution_message() {
    let mut snapshot = make_snapshot(Role::Dps);
    snapshot.checklist = None;
    let page = make_page_with(snapshot, ReportConfig::default(), CountingFetcher::new(0));

    let tree = page.render(&PageRequest::default()).unwrap();
    let alert = tree
        .find(&|c| matches!(c, Content::Alert { level: AlertLevel::Danger, .. }))
        .expect("missing checklist alert");
    assert!(has_text(alert, "checklist for this spec is not yet available"));
    assert!(alert.contains(&|c| matches!(c, Content::Link { label, .. } if label == "GitHub")));
    assert!(alert.contains(&|c| matches!(c, Content::Link { label, .. } if label == "Discord")));
    // Suggestions still render below
    assert!(tree.contains(&|c| matches!(c, Content::Suggestions { .. })));
}

// ─────────────────────────────────────────────────────────────────────────────
// Statistics
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_healer_statistics_mounts_mana_widget() {
    let (page, fetcher) = make_page(Role::Healer);
    let request = PageRequest::tab(CoreTab::Statistics);

    let first = page.render(&request).unwrap();
    assert!(has_loading(&first, "mana"));

    page.views().wait_settled(&ViewKey::Mana).await.unwrap();
    let second = page.render(&request).unwrap();
    assert!(has_view(&second, "mana"));
    assert!(has_text(&second, "mana view body"));
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_non_healer_statistics_has_no_mana_widget() {
    for role in [Role::Dps, Role::Tank] {
        let (page, fetcher) = make_page(role);
        let tree = page.render(&PageRequest::tab(CoreTab::Statistics)).unwrap();
        assert!(!has_loading(&tree, "mana"));
        assert!(!has_view(&tree, "mana"));
        assert_eq!(fetcher.calls(), 0);
    }
}

#[tokio::test(start_paused = true)]
async fn test_gated_role_comes_from_config() {
    let config = ReportConfig {
        gated_widget_role: Role::Tank,
        ..Default::default()
    };
    let page = make_page_with(make_snapshot(Role::Tank), config, CountingFetcher::new(0));
    let tree = page.render(&PageRequest::tab(CoreTab::Statistics)).unwrap();
    assert!(has_loading(&tree, "mana"));
}

#[tokio::test(start_paused = true)]
async fn test_cast_efficiency_groups_by_category() {
    let (page, _) = make_page(Role::Dps);
    let tree = page.render(&PageRequest::tab(CoreTab::Statistics)).unwrap();
    let Some(Content::CastEfficiency { groups }) =
        tree.find(&|c| matches!(c, Content::CastEfficiency { .. }))
    else {
        panic!("expected cast efficiency");
    };

    // Empty categories and unlisted abilities are left out
    let keys: Vec<_> = groups.iter().map(|g| g.category.key.as_str()).collect();
    assert_eq!(keys, vec!["rotational", "cooldowns"]);

    let wrath = &groups[1].lines[0];
    assert_eq!(wrath.name, "Avenging Wrath");
    assert_eq!(wrath.casts, "8/10");
    assert_eq!(wrath.efficiency, "50%");
    assert_eq!(wrath.cooldown.as_deref(), Some("45s"));
    assert!(wrath.below_recommended);
    assert!(!groups[0].lines[0].below_recommended);
}

#[tokio::test(start_paused = true)]
async fn test_missing_cast_efficiency_is_fatal() {
    let mut snapshot = make_snapshot(Role::Dps);
    snapshot.cast_efficiency = None;
    let page = make_page_with(snapshot, ReportConfig::default(), CountingFetcher::new(0));

    let err = page.render(&PageRequest::tab(CoreTab::Statistics)).unwrap_err();
    assert!(matches!(
        err,
        ReportError::RequiredModuleAbsent {
            capability: "CastEfficiency"
        }
    ));

    // Other tabs are unaffected
    assert!(page.render(&PageRequest::tab(CoreTab::Overview)).is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_missing_abilities_is_fatal() {
    let mut snapshot = make_snapshot(Role::Dps);
    snapshot.spell_categories = None;
    let page = make_page_with(snapshot, ReportConfig::default(), CountingFetcher::new(0));

    let err = page.render(&PageRequest::tab(CoreTab::Statistics)).unwrap_err();
    assert!(matches!(
        err,
        ReportError::RequiredModuleAbsent {
            capability: "Abilities"
        }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_downtime_toggle_changes_statistics() {
    let (page, _) = make_page(Role::Dps);
    let mut revision = page.revision();
    let request = PageRequest::tab(CoreTab::Statistics);

    assert!(has_statistic(&page.render(&request).unwrap(), "87%"));

    assert!(page.set_adjust_for_downtime(true));
    assert!(revision.has_changed().unwrap());
    revision.borrow_and_update();
    assert!(has_statistic(&page.render(&request).unwrap(), "96%"));

    // Same value again is not a change
    assert!(!page.set_adjust_for_downtime(true));
    assert!(!revision.has_changed().unwrap());
}

fn has_statistic(tree: &Content, value: &str) -> bool {
    tree.contains(&|c| match c {
        Content::Statistics { items } => items.iter().any(|s| s.value == value),
        _ => false,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Lazily Loaded Views
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_events_view_loads_once_across_renders() {
    let (page, fetcher) = make_page(Role::Dps);
    let mut revision = page.revision();
    let request = PageRequest::tab(CoreTab::Events);

    // Several passes before the fetch resolves share one fetch
    for _ in 0..3 {
        let tree = page.render(&request).unwrap();
        assert!(has_loading(&tree, "events"));
    }

    // Settling the slot asks the host to render again
    revision.changed().await.unwrap();
    let tree = page.render(&request).unwrap();
    assert!(has_view(&tree, "events"));
    assert!(has_text(&tree, "events view body"));

    // Unrelated re-renders never refetch
    page.render(&PageRequest::tab(CoreTab::Overview)).unwrap();
    page.render(&request).unwrap();
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failed_view_is_isolated() {
    let fetcher = CountingFetcher::new(u32::MAX);
    let page = make_page_with(make_snapshot(Role::Dps), ReportConfig::default(), fetcher.clone());
    let request = PageRequest::tab(CoreTab::Events);

    page.render(&request).unwrap();
    page.views().wait_settled(&ViewKey::Events).await.unwrap();

    let tree = page.render(&request).unwrap();
    let failed = tree
        .find(&|c| matches!(c, Content::LoadFailed { .. }))
        .expect("load failed affordance");
    assert_eq!(
        failed,
        &Content::LoadFailed {
            view: "events".to_string(),
            attempts: 3,
            message: "network error".to_string(),
        }
    );
    // The rest of the page still renders
    assert!(matches!(page_children(&tree)[0], Content::Header(_)));
    assert!(has_ad(&tree));

    tokio::time::sleep(Duration::from_secs(30)).await;
    page.render(&request).unwrap();
    assert_eq!(fetcher.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_transient_failure_recovers() {
    let fetcher = CountingFetcher::new(2);
    let page = make_page_with(make_snapshot(Role::Dps), ReportConfig::default(), fetcher.clone());
    let request = PageRequest::tab(CoreTab::Events);

    page.render(&request).unwrap();
    let slot = page.views().wait_settled(&ViewKey::Events).await.unwrap();
    assert_eq!(slot.attempts, 3);
    assert!(has_view(&page.render(&request).unwrap(), "events"));
}

#[test]
fn test_render_outside_runtime_fails_views_only() {
    let (page, fetcher) = make_page(Role::Healer);

    let tree = page.render(&PageRequest::tab(CoreTab::Statistics)).unwrap();
    assert!(tree.contains(&|c| matches!(
        c,
        Content::LoadFailed { view, attempts: 0, .. } if view == "mana"
    )));
    assert!(tree.contains(&|c| matches!(c, Content::CastEfficiency { .. })));
    assert!(has_statistic(&tree, "87%"));

    let events = page.render(&PageRequest::tab(CoreTab::Events)).unwrap();
    assert!(events.contains(&|c| matches!(
        c,
        Content::LoadFailed { view, .. } if view == "events"
    )));
    assert_eq!(fetcher.calls(), 0);
}

#[test]
fn test_render_from_host_thread_with_runtime() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_time()
        .build()
        .unwrap();
    let (page, fetcher) = make_page(Role::Dps);
    let page = page.with_runtime(runtime.handle().clone());
    let request = PageRequest::tab(CoreTab::Events);

    assert!(has_loading(&page.render(&request).unwrap(), "events"));
    runtime.block_on(page.views().wait_settled(&ViewKey::Events));
    assert!(has_view(&page.render(&request).unwrap(), "events"));
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_page_ignores_late_view() {
    let (page, fetcher) = make_page(Role::Dps);
    page.render(&PageRequest::tab(CoreTab::Events)).unwrap();
    drop(page);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(fetcher.calls(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Other Tabs
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_timeline_uses_resident_view() {
    let (page, fetcher) = make_page(Role::Dps);
    let tree = page.render(&PageRequest::tab(CoreTab::Timeline)).unwrap();
    assert!(has_view(&tree, "timeline"));
    assert!(has_text(&tree, "timeline body"));
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_character_tab_renders_both_panels() {
    let (page, _) = make_page(Role::Dps);
    let tree = page.render(&PageRequest::tab(CoreTab::Character)).unwrap();
    assert!(has_text(&tree, "character panel"));
    assert!(has_text(&tree, "encounter panel"));
}

#[tokio::test(start_paused = true)]
async fn test_character_tab_requires_encounter_panel() {
    let mut snapshot = make_snapshot(Role::Dps);
    snapshot.encounter_panel = None;
    let page = make_page_with(snapshot, ReportConfig::default(), CountingFetcher::new(0));
    let err = page.render(&PageRequest::tab(CoreTab::Character)).unwrap_err();
    assert!(matches!(
        err,
        ReportError::RequiredModuleAbsent {
            capability: "EncounterPanel"
        }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_about_tab_uses_config_and_changelog() {
    let mut config = ReportConfig::default();
    config.about.maintainers = vec!["Zerotorescue".to_string()];
    config.about.patch_compatibility = Some("8.1".to_string());
    let page = make_page_with(make_snapshot(Role::Healer), config, CountingFetcher::new(0));

    let tree = page.render(&PageRequest::tab(CoreTab::About)).unwrap();
    let Some(Content::About(about)) = tree.find(&|c| matches!(c, Content::About(_))) else {
        panic!("expected about content");
    };
    // Falls back to the combatant's spec when no name is configured
    assert_eq!(about.spec_name, "Holy Paladin");
    assert_eq!(about.patch_compatibility.as_deref(), Some("8.1"));
    assert!(tree.contains(&|c| matches!(c, Content::Changelog { entries } if entries.len() == 1)));
}

// ─────────────────────────────────────────────────────────────────────────────
// Page Chrome
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_ad_only_for_non_premium() {
    let (page, _) = make_page(Role::Dps);

    let free = page.render(&PageRequest::tab(CoreTab::Overview).premium(false)).unwrap();
    assert_eq!(
        page_children(&free).last(),
        Some(&Content::Ad {
            format: AD_FORMAT.to_string()
        })
    );

    let premium = page.render(&PageRequest::tab(CoreTab::Overview).premium(true)).unwrap();
    assert!(!has_ad(&premium));
}

#[tokio::test(start_paused = true)]
async fn test_results_warning_precedes_content() {
    let mut snapshot = make_snapshot(Role::Dps);
    if let Some(boss) = snapshot.boss.as_mut() {
        boss.results_warning = Some("Parts of this fight are not analyzed correctly.".to_string());
    }
    let page = make_page_with(snapshot, ReportConfig::default(), CountingFetcher::new(0));

    let tree = page.render(&PageRequest::default()).unwrap();
    let children = page_children(&tree);
    assert!(matches!(children[0], Content::Header(_)));
    assert!(matches!(
        children[1],
        Content::Alert {
            level: AlertLevel::Warning,
            ..
        }
    ));
    assert!(has_text(&children[1], "not analyzed correctly"));
    assert!(has_text(&children[2], "checklist body"));
}

#[tokio::test(start_paused = true)]
async fn test_header_summarizes_fight() {
    let (page, _) = make_page(Role::Healer);
    let request = PageRequest {
        character_profile: Some(CharacterProfile {
            region: "eu".to_string(),
            thumbnail: "draenor/1/2-avatar.jpg".to_string(),
        }),
        tab_url_prefix: "/report/AbC/4/42".to_string(),
        ..Default::default()
    };
    let tree = page.render(&request).unwrap();

    let Content::Page { css_class, children } = &tree else {
        panic!("expected page");
    };
    assert_eq!(css_class, "results boss-2145");
    let Content::Header(header) = &children[0] else {
        panic!("expected header");
    };
    assert_eq!(header.fight_name, "Heroic Zul");
    assert_eq!(header.boss_name.as_deref(), Some("Zul, Reborn"));
    assert_eq!(header.duration, "5:05");
    assert_eq!(header.spec_name, "Holy Paladin");
    assert_eq!(header.role, "Healer");
    assert_eq!(
        header.player_icon.as_deref(),
        Some("https://render-eu.worldofwarcraft.com/character/draenor/1/2-avatar.jpg")
    );
    assert_eq!(header.tabs[0].url, "/report/AbC/4/42/overview");
    assert_eq!(header.tabs.len(), CoreTab::all().len() + 1);
}

#[tokio::test(start_paused = true)]
async fn test_render_is_deterministic() {
    let (page, _) = make_page(Role::Dps);
    let request = PageRequest::tab(CoreTab::Statistics);
    assert_eq!(page.render(&request).unwrap(), page.render(&request).unwrap());
}
