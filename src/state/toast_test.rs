use super::*;

#[test]
fn push_assigns_unique_ids_in_order() {
    let mut state = ToastState::default();
    let a = state.push(Toast::new("first", ToastLevel::Info));
    let b = state.push(Toast::new("second", ToastLevel::Error));
    assert_ne!(a, b);
    let texts: Vec<_> = state.items.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second"]);
    assert_eq!(state.items[1].level, ToastLevel::Error);
}

#[test]
fn dismiss_removes_only_matching_toast() {
    let mut state = ToastState::default();
    let a = state.push(Toast::new("first", ToastLevel::Info));
    state.push(Toast::new("second", ToastLevel::Success));
    state.dismiss(&a);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].text, "second");
    state.dismiss("unknown");
    assert_eq!(state.items.len(), 1);
}
