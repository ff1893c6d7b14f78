use super::*;

fn conn(id: &str, status: &str) -> VpnConnection {
    VpnConnection {
        conn_id: id.to_owned(),
        status: status.to_owned(),
    }
}

#[test]
fn opening_requests_a_refresh() {
    let mut state = VpnState::default();
    assert!(state.toggle_open());
    assert!(state.loading);
    assert!(!state.toggle_open());
    assert!(!state.open);
}

#[test]
fn set_loaded_replaces_connections() {
    let mut state = VpnState::default();
    state.toggle_open();
    state.set_loaded(Ok(vec![conn("conn_0", "USED"), conn("conn_1", "N/U")]));
    assert!(!state.loading);
    assert_eq!(state.connections.len(), 2);
    assert_eq!(state.used_count(), 1);
}

#[test]
fn failed_refresh_keeps_last_list() {
    let mut state = VpnState::default();
    state.set_loaded(Ok(vec![conn("conn_0", "USED")]));
    state.toggle_open();
    state.set_loaded(Err("/vpn/status failed: 500".to_owned()));
    assert_eq!(state.connections.len(), 1);
    assert_eq!(state.error.as_deref(), Some("/vpn/status failed: 500"));
}
