use crate::SolidAccessError;
use serde::{Deserialize, Serialize};

/// The four orthogonal access modes of a Solid authorization grant.
///
/// `write` is a strict superset of `append`: every merge and mutation in
/// this crate runs [`AccessModes::normalized`] so that a granted `write`
/// always carries `append` with it, no matter how the source rules spelled
/// it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessModes {
    /// Permission to read the resource
    pub read: bool,
    /// Permission to add to the resource without replacing existing data
    pub append: bool,
    /// Permission to replace or delete the resource (implies `append`)
    pub write: bool,
    /// Permission to change the rules that govern the resource
    pub control: bool,
}

impl AccessModes {
    /// No access at all
    pub const NONE: AccessModes = AccessModes {
        read: false,
        append: false,
        write: false,
        control: false,
    };

    /// The mode-wise OR of two grants
    pub fn union(self, other: AccessModes) -> AccessModes {
        AccessModes {
            read: self.read || other.read,
            append: self.append || other.append,
            write: self.write || other.write,
            control: self.control || other.control,
        }
        .normalized()
    }

    /// A copy with the write-implies-append invariant applied
    pub fn normalized(mut self) -> AccessModes {
        if self.write {
            self.append = true;
        }
        self
    }

    /// Whether no mode is granted
    pub fn is_empty(self) -> bool {
        self == AccessModes::NONE
    }
}

/// The WAC-facing shape of a grant, with control split into its read and
/// write halves.
///
/// WAC itself can only express the two together; the split exists so that
/// results are comparable with richer models. Converting back into
/// [`AccessModes`] fails when the two halves differ.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WacAccess {
    /// Permission to read the resource
    pub read: bool,
    /// Permission to add to the resource
    pub append: bool,
    /// Permission to replace or delete the resource
    pub write: bool,
    /// Permission to read the resource's ACL
    pub control_read: bool,
    /// Permission to change the resource's ACL
    pub control_write: bool,
}

impl WacAccess {
    /// Collapse the control split back into a single mode. Fails with
    /// [`SolidAccessError::UnequalControlModes`] when the two halves differ.
    pub fn combined(self) -> Result<AccessModes, SolidAccessError> {
        if self.control_read != self.control_write {
            return Err(SolidAccessError::UnequalControlModes);
        }
        Ok(AccessModes {
            read: self.read,
            append: self.append,
            write: self.write,
            control: self.control_read,
        })
    }
}

impl From<AccessModes> for WacAccess {
    fn from(modes: AccessModes) -> Self {
        let modes = modes.normalized();
        WacAccess {
            read: modes.read,
            append: modes.append,
            write: modes.write,
            control_read: modes.control,
            control_write: modes.control,
        }
    }
}

/// What to do to a single mode during a partial update
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeChange {
    /// Grant the mode
    Grant,
    /// Revoke the mode
    Revoke,
    /// Keep whatever the actor previously had
    #[default]
    Unchanged,
}

impl ModeChange {
    /// Apply this change to the current state of a mode
    pub fn apply(self, current: bool) -> bool {
        match self {
            ModeChange::Grant => true,
            ModeChange::Revoke => false,
            ModeChange::Unchanged => current,
        }
    }
}

/// A partial update to an actor's grant. Every mode defaults to
/// [`ModeChange::Unchanged`], so a caller only names the modes it wants to
/// move and everything else is preserved.
///
/// ```rust
/// use solid_access::AccessChange;
///
/// // grant read, revoke write, leave append and control alone
/// let change = AccessChange::default().read(true).write(false);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessChange {
    /// The change to the read mode
    pub read: ModeChange,
    /// The change to the append mode
    pub append: ModeChange,
    /// The change to the write mode
    pub write: ModeChange,
    /// The change to the control-read mode
    pub control_read: ModeChange,
    /// The change to the control-write mode
    pub control_write: ModeChange,
}

impl AccessChange {
    /// A change that grants every mode set in `modes` and leaves the rest
    /// unchanged
    pub fn grant(modes: AccessModes) -> Self {
        AccessChange::default().apply_modes(modes, ModeChange::Grant)
    }

    /// A change that revokes every mode set in `modes` and leaves the rest
    /// unchanged
    pub fn revoke(modes: AccessModes) -> Self {
        AccessChange::default().apply_modes(modes, ModeChange::Revoke)
    }

    fn apply_modes(mut self, modes: AccessModes, change: ModeChange) -> Self {
        if modes.read {
            self.read = change;
        }
        if modes.append {
            self.append = change;
        }
        if modes.write {
            self.write = change;
        }
        if modes.control {
            self.control_read = change;
            self.control_write = change;
        }
        self
    }

    /// Set the read mode
    pub fn read(mut self, grant: bool) -> Self {
        self.read = if grant { ModeChange::Grant } else { ModeChange::Revoke };
        self
    }

    /// Set the append mode
    pub fn append(mut self, grant: bool) -> Self {
        self.append = if grant { ModeChange::Grant } else { ModeChange::Revoke };
        self
    }

    /// Set the write mode
    pub fn write(mut self, grant: bool) -> Self {
        self.write = if grant { ModeChange::Grant } else { ModeChange::Revoke };
        self
    }

    /// Set both halves of the control mode together
    pub fn control(mut self, grant: bool) -> Self {
        let change = if grant { ModeChange::Grant } else { ModeChange::Revoke };
        self.control_read = change;
        self.control_write = change;
        self
    }

    /// Whether this change moves any mode at all
    pub fn is_noop(&self) -> bool {
        *self == AccessChange::default()
    }

    /// Validate that control-read and control-write are changed together,
    /// which is all the WAC data model (and the single control mode of ACP)
    /// can express
    pub fn validated(self) -> Result<Self, SolidAccessError> {
        if self.control_read != self.control_write {
            return Err(SolidAccessError::UnequalControlModes);
        }
        Ok(self)
    }

    /// The grant that results from applying this change on top of `current`
    pub fn apply(self, current: AccessModes) -> AccessModes {
        AccessModes {
            read: self.read.apply(current.read),
            append: self.append.apply(current.append),
            write: self.write.apply(current.write),
            control: self.control_read.apply(current.control),
        }
        .normalized()
    }
}
