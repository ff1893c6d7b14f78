use super::*;

#[test]
fn stopping_a_detached_handle_is_harmless() {
    let handle = FeedHandle::default();
    handle.stop();
    handle.stop();
}
