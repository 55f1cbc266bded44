use addrole_framework::error::{CommandError, Principal};
use addrole_models::role::RoleRef;

/// Allows the grant only if `principal`'s highest role strictly outranks `role`.
pub fn ensure_outranks(
    principal: Principal,
    highest_position: i64,
    role: &RoleRef,
) -> Result<(), CommandError> {
    if role.is_below(highest_position) {
        Ok(())
    } else {
        Err(CommandError::Hierarchy {
            principal,
            role: role.name.clone(),
        })
    }
}
