//! Reactive access to the derived capability set.

use access::AccessPermissions;
use leptos::prelude::*;

use crate::state::auth::AuthState;

/// Memoized permissions for the current auth state.
///
/// Recomputed whenever `AuthState` changes; subscribers are notified only when
/// the derived record actually differs.
pub fn use_access_permissions() -> Memo<AccessPermissions> {
    let auth = expect_context::<RwSignal<AuthState>>();
    Memo::new(move |_| auth.with(|state| AccessPermissions::derive(&state.snapshot())))
}
