//! Static emergency-contact list
//!
//! Fixed data with no logic; surfaced alongside classification reports so
//! responders are always listed even when a snapshot is empty.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmergencyContact {
    pub name: &'static str,
    pub role: &'static str,
    pub phone: &'static str,
}

const CONTACTS: [EmergencyContact; 3] = [
    EmergencyContact { name: "John Smith", role: "Fire Chief", phone: "555-123-4567" },
    EmergencyContact { name: "Emily Chen", role: "Safety Officer", phone: "555-987-6543" },
    EmergencyContact { name: "Liam Patel", role: "Building Manager", phone: "555-234-5678" },
];

pub fn emergency_contacts() -> &'static [EmergencyContact] {
    &CONTACTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_list_is_fixed() {
        let contacts = emergency_contacts();
        assert_eq!(contacts.len(), 3);
        assert_eq!(contacts[0].role, "Fire Chief");
    }
}
