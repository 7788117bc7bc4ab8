//! All-or-nothing execution of a decoded intent sequence.

use crate::{
    errors::InvokeError,
    types::{
        invocation::{InvocationSurface, Transactional},
        opcodes::{Intent, Operation},
    },
};

/// First intent that failed, by position in the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentFailure {
    pub index: usize,
    pub cause: InvokeError,
}

/// Invokes every intent in order, stopping at the first failure.
///
/// On failure the surface is rolled back to where it stood before the first intent, so no
/// effect of a partially executed sequence stays observable. `ctx` is handed through to each
/// invocation and may be re-entered by the target.
pub fn execute_intents<C, I>(
    ctx: &mut C,
    surface: &mut I,
    intents: &[Intent],
) -> Result<(), IntentFailure>
where
    C: ?Sized,
    I: InvocationSurface<C> + Transactional,
{
    let checkpoint = surface.checkpoint();

    for (index, intent) in intents.iter().enumerate() {
        let result = match &intent.operation {
            Operation::Invoke { method, args } => {
                surface.invoke(ctx, intent.target, method, args)
            }
            // Literal pushes and packs only exist while decoding; they are never dispatched.
            Operation::PackArray(_) | Operation::PushLiteral(_) => Err(InvokeError::NotInvocable),
        };

        // Return data is not consumed by later intents.
        if let Err(cause) = result {
            surface.rollback(checkpoint);
            return Err(IntentFailure { index, cause });
        }
    }

    Ok(())
}
