use super::*;

#[test]
fn toast_class_per_level() {
    assert_eq!(toast_class(ToastLevel::Info), "toast toast--info");
    assert_eq!(toast_class(ToastLevel::Success), "toast toast--success");
    assert_eq!(toast_class(ToastLevel::Error), "toast toast--error");
}
