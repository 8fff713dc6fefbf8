use super::{ClassifyError, Context, template};
use crate::activity::summary::Cardinality;

/// Actors follow the object users.
pub(super) fn follow(ctx: &Context<'_>) -> Result<String, ClassifyError> {
    let template_id = if ctx.object_is_you() {
        template(&["FOLLOWING_YOU", ctx.actor_count().label()])
    } else if ctx.actor_count() == Cardinality::One {
        template(&["FOLLOWING", ctx.object_count().label()])
    } else {
        template(&["FOLLOWING_ACTORS", ctx.actor_count().label()])
    };
    Ok(template_id)
}
