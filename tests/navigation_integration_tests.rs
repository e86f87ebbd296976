use navstack::core::route::{is_ancestor, is_related, is_sibling};
use navstack::{
    ErrorKind, History, MemoryHistory, Navigator, PartialLocation, PushOutcome, RouteConfig,
    RouteTable,
};
use serde_json::json;

// ============================================================================
// Helper Functions
// ============================================================================

/// Sign-up funnel with a settings section nested two levels deep.
fn app_routes() -> RouteTable<&'static str> {
    RouteTable::new(vec![
        RouteConfig::new("/", "Home"),
        RouteConfig::new("funnel", "Funnel")
            .child(RouteConfig::new("name", "FunnelName"))
            .child(RouteConfig::new("email", "FunnelEmail")),
        RouteConfig::new("settings", "Settings").child(
            RouteConfig::new("account", "Account")
                .child(RouteConfig::new("password", "Password")),
        ),
        RouteConfig::new("*", "NotFound"),
    ])
}

fn navigator() -> Navigator<MemoryHistory, &'static str> {
    Navigator::new(MemoryHistory::new("/"), app_routes())
}

fn stack(nav: &Navigator<MemoryHistory, &'static str>) -> Vec<String> {
    nav.state()
        .flat_activities
        .iter()
        .map(|a| a.pathname.clone())
        .collect()
}

// ============================================================================
// Push Results
// ============================================================================

#[tokio::test]
async fn test_awaiting_push_result() {
    let mut nav = navigator();
    let result = nav.push("/funnel/name").unwrap();
    nav.pop(Some(json!({"name": "Ada"}))).unwrap();

    assert_eq!(result.await, PushOutcome::Popped(Some(json!({"name": "Ada"}))));
}

#[tokio::test]
async fn test_nested_funnel_results_resolve_in_order() {
    let mut nav = navigator();
    let name = nav.push("/funnel/name").unwrap();
    let email = nav.push("/funnel/email").unwrap();

    nav.pop(Some(json!("ada@example.com"))).unwrap();
    nav.pop(Some(json!("Ada"))).unwrap();

    assert_eq!(email.await.value(), Some(&json!("ada@example.com")));
    assert_eq!(name.await.value(), Some(&json!("Ada")));
    assert_eq!(nav.state().top().pathname, "/");
}

#[tokio::test]
async fn test_external_back_dismisses_pending_push() {
    let mut nav = navigator();
    let result = nav.push("/settings/account").unwrap();

    nav.history_mut().go(-1);
    nav.sync().unwrap();

    assert!(result.await.is_dismissed());
    assert!(!nav.is_pending("/settings/account"));
}

#[tokio::test]
async fn test_push_with_partial_location_keeps_pathname() {
    let mut nav = navigator();
    nav.push("/funnel/name").unwrap();
    let result = nav
        .push(PartialLocation {
            search: Some("?step=2".to_string()),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(result.pathname(), "/funnel/name");
    assert_eq!(nav.state().location.to_string(), "/funnel/name?step=2");
}

// ============================================================================
// Two-Phase Removal
// ============================================================================

#[test]
fn test_popped_screen_stays_until_exit_finished() {
    let mut nav = navigator();
    nav.push("/settings/account").unwrap();
    nav.pop(None).unwrap();

    assert_eq!(nav.state().activity_index, 0);
    assert_eq!(stack(&nav), vec!["/", "/settings/account"]);
    assert_eq!(nav.state().exiting().len(), 1);
    assert!(nav.state().activities.iter().any(|a| !a.is_present));

    nav.exit_finished().unwrap();
    assert_eq!(stack(&nav), vec!["/"]);
    assert!(nav.state().activities.iter().all(|a| a.is_present));
}

#[test]
fn test_push_after_pop_discards_exiting_entries() {
    let mut nav = navigator();
    nav.push("/settings/account").unwrap();
    nav.pop(None).unwrap();
    nav.push("/funnel/name").unwrap();

    assert_eq!(stack(&nav), vec!["/", "/funnel/name"]);
    assert_eq!(nav.state().activity_index, 1);
    assert_eq!(nav.state().top().index, 2);
}

// ============================================================================
// Stacking Rules
// ============================================================================

#[test]
fn test_sibling_push_switches_step_in_place() {
    let mut nav = navigator();
    nav.push("/funnel/name").unwrap();
    nav.push("/funnel/email").unwrap();

    // Both steps share the funnel node in the composed tree.
    let funnel: Vec<_> = nav
        .state()
        .activities
        .iter()
        .filter(|a| a.full_path == "/funnel")
        .collect();
    assert_eq!(funnel.len(), 1);
    assert_eq!(funnel[0].children.len(), 2);
}

#[test]
fn test_related_screen_below_unrelated_one_is_rejected() {
    let mut nav = navigator();
    nav.push("/funnel/name").unwrap();
    nav.push("/settings/account").unwrap();

    let err = nav.push("/funnel/email").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AncestorNotAtTop);
    assert_eq!(stack(&nav), vec!["/", "/funnel/name", "/settings/account"]);
    // The history is moved back to the top of the stack.
    assert_eq!(nav.history().current_location().pathname, "/settings/account");
    assert_eq!(nav.history().entries().len(), 4);

    nav.pop(None).unwrap();
    assert_eq!(nav.state().top().pathname, "/funnel/name");
}

#[test]
fn test_pop_until_then_push_recovers_from_rejection() {
    let mut nav = navigator();
    nav.push("/funnel/name").unwrap();
    nav.push("/settings/account").unwrap();

    nav.pop_until(|a| a.pathname == "/funnel/name").unwrap();
    nav.exit_finished().unwrap();
    nav.push("/funnel/email").unwrap();

    assert_eq!(stack(&nav), vec!["/", "/funnel/name", "/funnel/email"]);
}

#[test]
fn test_replace_swaps_top() {
    let mut nav = navigator();
    nav.push("/settings/account").unwrap();
    nav.replace("/settings/account/password").unwrap();

    assert_eq!(stack(&nav), vec!["/", "/settings/account/password"]);
    assert_eq!(nav.state().activity_index, 1);
}

// ============================================================================
// Route Matching
// ============================================================================

#[test]
fn test_exact_match_beats_fallback() {
    let routes = app_routes();
    let chain = routes.match_path("/settings/account/password");
    let full_paths: Vec<_> = chain.iter().map(|s| s.full_path.as_str()).collect();
    assert_eq!(
        full_paths,
        vec!["/settings", "/settings/account", "/settings/account/password"]
    );
}

#[test]
fn test_unknown_path_falls_back() {
    let routes = app_routes();
    let chain = routes.match_path("/nowhere");
    assert_eq!(chain.len(), 1);
    assert!(chain[0].route.is_fallback());
}

#[test]
fn test_chain_relations() {
    let routes = app_routes();
    let name = routes.match_path("/funnel/name");
    let email = routes.match_path("/funnel/email");
    let funnel = routes.match_path("/funnel");
    let account = routes.match_path("/settings/account");

    assert!(is_sibling(&name, &email));
    assert!(is_ancestor(&funnel, &name));
    assert!(!is_ancestor(&name, &funnel));
    assert!(is_related(&funnel, &email));
    assert!(!is_related(&account, &name));
}
