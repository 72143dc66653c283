//! Step locator - finds the step an identifier refers to

use crate::core::{MockError, Step, StepSelector};
use tracing::debug;

/// Find the first step whose selected field equals the selector's key
///
/// `job` only labels the error; composite actions pass a synthetic label.
pub fn locate<'a>(
    steps: &'a [Step],
    selector: &StepSelector,
    job: &str,
) -> Result<(usize, &'a Step), MockError> {
    let found = steps
        .iter()
        .enumerate()
        .find(|(_, step)| selector.matches(step));

    match found {
        Some((index, step)) => {
            debug!("Located step {} at index {} in {}", selector, index, job);
            Ok((index, step))
        }
        None => Err(MockError::StepNotFound {
            job: job.to_string(),
            selector: selector.clone(),
        }),
    }
}
