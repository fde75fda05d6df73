/// Creates a single [`ChatTurn`](crate::ChatTurn) from a role shorthand.
///
/// ```rust
/// use ruleweave::{Role, rw_turn};
///
/// let turn = rw_turn!(assistant => "Here is your rule...");
/// assert_eq!(turn.role, Role::Assistant);
/// assert_eq!(turn.content, "Here is your rule...");
/// ```
#[macro_export]
macro_rules! rw_turn {
    (user => $content:expr $(,)?) => {
        $crate::ChatTurn::new($crate::Role::User, $content)
    };
    (assistant => $content:expr $(,)?) => {
        $crate::ChatTurn::new($crate::Role::Assistant, $content)
    };
    ($role:ident => $content:expr $(,)?) => {
        compile_error!("unsupported role: use user or assistant");
    };
}

/// Creates a `Vec<ChatTurn>` from role/content pairs.
///
/// ```rust
/// use ruleweave::{Role, rw_turns};
///
/// let turns = rw_turns![
///     user => "Create a discount rule",
///     assistant => "Here is your rule...",
/// ];
///
/// assert_eq!(turns.len(), 2);
/// assert_eq!(turns[0].role, Role::User);
/// assert_eq!(turns[1].role, Role::Assistant);
/// ```
#[macro_export]
macro_rules! rw_turns {
    () => {
        Vec::<$crate::ChatTurn>::new()
    };
    ($($role:ident => $content:expr),+ $(,)?) => {
        vec![$($crate::rw_turn!($role => $content)),+]
    };
}
