use std::fmt::Display;

use serde::Serialize;
use serde::ser::SerializeStruct;
use weeniefab_id::Did;

/// One selectable identifier, as offered by a dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DidOption {
    pub did: Did,
    /// Whether the content archive had this id when the option was built
    pub exists_in_archive: bool,
}

impl DidOption {
    pub fn new(did: Did, exists_in_archive: bool) -> Self {
        Self {
            did,
            exists_in_archive,
        }
    }

    pub fn hex(&self) -> String {
        self.did.to_hex()
    }

    /// `10 (0x0000000A)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.did, self.hex())
    }
}

impl Display for DidOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

// the derived forms go on the wire too so consumers do not reformat ids themselves
impl Serialize for DidOption {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("DidOption", 4)?;
        state.serialize_field("did", &self.did)?;
        state.serialize_field("hex", &self.hex())?;
        state.serialize_field("label", &self.label())?;
        state.serialize_field("exists_in_archive", &self.exists_in_archive)?;
        state.end()
    }
}
