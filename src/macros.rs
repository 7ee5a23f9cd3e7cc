/// Macro for model field updates with automatic rendering.
///
/// Only renders when the field actually changed, so repeated identical
/// snapshots from the shell stay free.
///
/// # Example
///
/// ```ignore
/// update_field!(model.session, session)
/// ```
#[macro_export]
macro_rules! update_field {
    ($model_field:expr, $value:expr) => {{
        let value = $value;
        if $model_field != value {
            $model_field = value;
            crux_core::render::render()
        } else {
            crux_core::Command::done()
        }
    }};
}
