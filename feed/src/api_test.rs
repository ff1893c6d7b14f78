use super::*;

#[test]
fn vpn_connection_reads_wire_field_names() {
    let rows: Vec<VpnConnection> =
        serde_json::from_str(r#"[{"vpnConnID":"conn_0","status":"USED"},{"vpnConnID":"conn_1","status":"N/U"}]"#)
            .expect("rows");
    assert!(rows[0].is_used());
    assert!(!rows[1].is_used());
    assert_eq!(rows[1].config_file_name().as_deref(), Some("conn_1.conf"));
}

#[test]
fn vpn_config_file_name_requires_numeric_suffix() {
    assert_eq!(vpn_config_file_name("conn_3").as_deref(), Some("conn_3.conf"));
    assert_eq!(vpn_config_file_name("conn"), None);
    assert_eq!(vpn_config_file_name("conn_x"), None);
}

#[test]
fn vpn_download_request_uses_wire_field_name() {
    let body = VpnDownloadRequest { conn_id: "conn_2".to_owned() };
    assert_eq!(
        serde_json::to_value(&body).expect("json"),
        serde_json::json!({ "vpnConnID": "conn_2" })
    );
}

#[test]
fn lab_info_reads_vpn_mode_and_subnet() {
    let info: LabInfo =
        serde_json::from_str(r#"{"isVPN":1,"labSubnet":"10.1.2.0/24"}"#).expect("lab info");
    assert!(info.vpn_enabled());
    assert_eq!(info.lab_subnet, "10.1.2.0/24");

    let off: LabInfo =
        serde_json::from_str(r#"{"isVPN":0,"labSubnet":"VPN is not enabled !"}"#).expect("lab info");
    assert!(!off.vpn_enabled());
}

#[test]
fn tag_request_serialises_tag_only() {
    let body = TagRequest { tag: "xss-1".to_owned() };
    assert_eq!(serde_json::to_string(&body).expect("json"), r#"{"tag":"xss-1"}"#);
}
