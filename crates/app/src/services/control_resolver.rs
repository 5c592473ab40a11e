//! Control resolver — `(mode, gesture)` to a control with its IR code.

use gesturehub_domain::error::{HubError, NotFoundError};
use gesturehub_domain::id::{Control, Gesture, Mode};

use crate::ports::{CapabilityStore, MappingRepository};

/// A control ready to be actuated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedControl {
    pub control: Control,
    pub code: String,
    pub label: String,
}

/// Looks up the control bound to a gesture and its actuation code.
pub struct ControlResolver<C, M> {
    capabilities: C,
    mappings: M,
}

impl<C: CapabilityStore, M: MappingRepository> ControlResolver<C, M> {
    pub fn new(capabilities: C, mappings: M) -> Self {
        Self {
            capabilities,
            mappings,
        }
    }

    /// Resolve `gesture` within `mode`. Has no side effects.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] when the gesture is not mapped in `mode`,
    /// or when the mapped control has no actuation code.
    pub async fn resolve(&self, mode: &Mode, gesture: &Gesture) -> Result<ResolvedControl, HubError> {
        let mapping = self
            .mappings
            .find_control(mode, gesture)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "ControlMapping",
                id: format!("{mode}/{gesture}"),
            })?;

        let capability = self.capabilities.get(mode, &mapping.control).await?;
        let code = capability
            .as_ref()
            .and_then(|c| c.actuation_code())
            .ok_or_else(|| NotFoundError {
                entity: "ActuationCode",
                id: format!("{mode}/{}", mapping.control),
            })?
            .to_string();

        let label = if mapping.label.is_empty() {
            capability.map(|c| c.label).unwrap_or_default()
        } else {
            mapping.label
        };

        Ok(ResolvedControl {
            control: mapping.control,
            code,
            label,
        })
    }
}
