//! The metatype of a BPMN element.
//!
//! The extension model only distinguishes the handful of element kinds it
//! attaches behavior to. Capability predicates (`is_activity`, `supports_acl`,
//! …) replace runtime type tests against the host DOM.

/// Element kinds derived from the BPMN 2.0 local tag name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Definitions,
    Process,

    // Activities
    Task,
    UserTask,
    ServiceTask,
    ScriptTask,
    SendTask,
    ReceiveTask,
    ManualTask,
    BusinessRuleTask,
    CallActivity,
    SubProcess,

    // Events
    StartEvent,
    EndEvent,
    CatchEvent,
    ThrowEvent,
    BoundaryEvent,

    // Gateways
    ExclusiveGateway,
    InclusiveGateway,
    ParallelGateway,
    EventBasedGateway,
    ComplexGateway,

    SequenceFlow,

    // Data
    DataObject,
    DataObjectReference,

    Documentation,
    ExtensionElements,

    /// Any element the extension model does not care about.
    Other,
}

impl ElementKind {
    /// Derive the kind from a BPMN local tag name.
    pub fn from_local(local: &str) -> Self {
        match local {
            "definitions" => Self::Definitions,
            "process" => Self::Process,
            "task" => Self::Task,
            "userTask" => Self::UserTask,
            "serviceTask" => Self::ServiceTask,
            "scriptTask" => Self::ScriptTask,
            "sendTask" => Self::SendTask,
            "receiveTask" => Self::ReceiveTask,
            "manualTask" => Self::ManualTask,
            "businessRuleTask" => Self::BusinessRuleTask,
            "callActivity" => Self::CallActivity,
            "subProcess" => Self::SubProcess,
            "startEvent" => Self::StartEvent,
            "endEvent" => Self::EndEvent,
            "intermediateCatchEvent" => Self::CatchEvent,
            "intermediateThrowEvent" => Self::ThrowEvent,
            "boundaryEvent" => Self::BoundaryEvent,
            "exclusiveGateway" => Self::ExclusiveGateway,
            "inclusiveGateway" => Self::InclusiveGateway,
            "parallelGateway" => Self::ParallelGateway,
            "eventBasedGateway" => Self::EventBasedGateway,
            "complexGateway" => Self::ComplexGateway,
            "sequenceFlow" => Self::SequenceFlow,
            "dataObject" => Self::DataObject,
            "dataObjectReference" => Self::DataObjectReference,
            "documentation" => Self::Documentation,
            "extensionElements" => Self::ExtensionElements,
            _ => Self::Other,
        }
    }

    /// Returns true for task-like elements.
    pub fn is_activity(&self) -> bool {
        matches!(
            self,
            Self::Task
                | Self::UserTask
                | Self::ServiceTask
                | Self::ScriptTask
                | Self::SendTask
                | Self::ReceiveTask
                | Self::ManualTask
                | Self::BusinessRuleTask
                | Self::CallActivity
                | Self::SubProcess
        )
    }

    /// Returns true for event-like elements.
    pub fn is_event(&self) -> bool {
        matches!(
            self,
            Self::StartEvent
                | Self::EndEvent
                | Self::CatchEvent
                | Self::ThrowEvent
                | Self::BoundaryEvent
        )
    }

    pub fn is_gateway(&self) -> bool {
        matches!(
            self,
            Self::ExclusiveGateway
                | Self::InclusiveGateway
                | Self::ParallelGateway
                | Self::EventBasedGateway
                | Self::ComplexGateway
        )
    }

    /// Elements that may carry ACL cross-reference items.
    pub fn supports_acl(&self) -> bool {
        self.is_activity() || self.is_event()
    }

    /// Data-object-like elements subject to type classification.
    pub fn is_data_object(&self) -> bool {
        matches!(self, Self::DataObject | Self::DataObjectReference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_kind_from_local_name() {
        assert_eq!(ElementKind::from_local("userTask"), ElementKind::UserTask);
        assert_eq!(
            ElementKind::from_local("intermediateCatchEvent"),
            ElementKind::CatchEvent
        );
        assert_eq!(ElementKind::from_local("lane"), ElementKind::Other);
    }

    #[test]
    fn acl_capability_covers_activities_and_events() {
        assert!(ElementKind::Task.supports_acl());
        assert!(ElementKind::CatchEvent.supports_acl());
        assert!(!ElementKind::DataObject.supports_acl());
        assert!(!ElementKind::ExclusiveGateway.supports_acl());
    }
}
