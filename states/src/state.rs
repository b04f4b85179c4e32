use std::any::Any;

/// Marker for values that can live inside a [`StateCtx`](crate::StateCtx).
pub trait State: Any {
    /// Human readable name used in log lines and errors.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
