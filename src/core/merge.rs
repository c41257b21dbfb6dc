//! Default/override merge of system records
//!
//! The global defaults file supplies values every system shares; the
//! system's own file overrides them field by field. Overrides only add or
//! replace, they never clear a field.

use crate::entities::system::{Contact, ContactRole, Link, System};

/// Merge `overrides` on top of `defaults`, returning a new record
///
/// - scalar fields: replaced when the override is non-empty
/// - link lists: replaced wholesale when the override list is non-empty
/// - contacts: replaced wholesale when the override has at least one entry
pub fn merge(defaults: &System, overrides: &System) -> System {
    let mut merged = defaults.clone();

    override_string(&mut merged.system_code, &overrides.system_code);
    override_string(&mut merged.name, &overrides.name);
    override_string(&mut merged.description, &overrides.description);
    override_string(&mut merged.service_tier, &overrides.service_tier);
    override_string(&mut merged.lifecycle_stage, &overrides.lifecycle_stage);
    override_string(&mut merged.architecture_diagram, &overrides.architecture_diagram);
    override_string(&mut merged.troubleshooting, &overrides.troubleshooting);
    override_links(&mut merged.more_information, &overrides.more_information);
    override_links(&mut merged.monitoring, &overrides.monitoring);
    override_string(&mut merged.git_repository, &overrides.git_repository);
    override_string(&mut merged.host_platform, &overrides.host_platform);

    for role in ContactRole::ALL {
        override_contact(merged.contact_mut(role), overrides.contact(role));
    }

    merged
}

fn override_string(target: &mut String, value: &str) {
    if !value.is_empty() {
        *target = value.to_string();
    }
}

fn override_links(target: &mut Vec<Link>, value: &[Link]) {
    if !value.is_empty() {
        *target = value.to_vec();
    }
}

fn override_contact(target: &mut Contact, value: &Contact) {
    if !value.is_empty() {
        *target = value.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::system::ContactEntry;

    fn full_system(tag: &str) -> System {
        let contact = |role: &str| Contact::new(vec![ContactEntry::new(format!("{tag}-{role}"))]);
        System {
            system_code: format!("{tag}-code"),
            name: format!("{tag}-name"),
            description: format!("{tag}-description"),
            service_tier: format!("{tag}-tier"),
            lifecycle_stage: format!("{tag}-stage"),
            architecture_diagram: format!("{tag}-diagram"),
            troubleshooting: format!("{tag}-troubleshooting"),
            more_information: vec![Link::new(format!("{tag}-docs"), "https://docs")],
            monitoring: vec![Link::new(format!("{tag}-dash"), "https://dash")],
            git_repository: format!("{tag}-repo"),
            host_platform: format!("{tag}-platform"),
            primary_contact: contact("primary"),
            secondary_contact: contact("secondary"),
            programme: contact("programme"),
            product_owner: contact("owner"),
            technical_lead: contact("lead"),
        }
    }

    #[test]
    fn test_empty_override_preserves_defaults() {
        let defaults = full_system("d");
        assert_eq!(merge(&defaults, &System::default()), defaults);
    }

    #[test]
    fn test_full_override_wins_everywhere() {
        let defaults = full_system("d");
        let overrides = full_system("o");
        assert_eq!(merge(&defaults, &overrides), overrides);
    }

    #[test]
    fn test_merge_never_clears() {
        let defaults = full_system("d");
        let mut overrides = System::default();
        overrides.name = "Widget".to_string();
        overrides.monitoring = vec![Link::new("New", "https://new")];

        let merged = merge(&defaults, &overrides);
        assert_eq!(merged.name, "Widget");
        assert_eq!(merged.description, "d-description");
        assert_eq!(merged.more_information, defaults.more_information);
        for role in ContactRole::ALL {
            assert!(!merged.contact(role).is_empty(), "{role} was cleared");
        }
    }

    #[test]
    fn test_global_tier_with_system_identity() {
        let mut global = System::default();
        global.service_tier = "Gold".to_string();

        let mut system = System::default();
        system.system_code = "abc".to_string();
        system.name = "Widget".to_string();

        let merged = merge(&global, &system);
        let mut expected = System::default();
        expected.system_code = "abc".to_string();
        expected.name = "Widget".to_string();
        expected.service_tier = "Gold".to_string();
        assert_eq!(merged, expected);
    }

    #[test]
    fn test_link_list_replaced_wholesale() {
        let mut defaults = System::default();
        defaults.monitoring = vec![
            Link::new("A", "https://a"),
            Link::new("B", "https://b"),
        ];
        let mut overrides = System::default();
        overrides.monitoring = vec![Link::new("C", "https://c")];

        let merged = merge(&defaults, &overrides);
        assert_eq!(merged.monitoring, vec![Link::new("C", "https://c")]);
    }

    #[test]
    fn test_contact_replaced_wholesale() {
        let mut defaults = System::default();
        defaults.programme = Contact::new(vec![ContactEntry::new("p-1"), ContactEntry::new("p-2")]);
        let mut overrides = System::default();
        overrides.programme = Contact::new(vec![ContactEntry::new("p-3")]);

        let merged = merge(&defaults, &overrides);
        assert_eq!(merged.programme, overrides.programme);
    }

    #[test]
    fn test_inputs_untouched() {
        let defaults = full_system("d");
        let overrides = full_system("o");
        let (d_before, o_before) = (defaults.clone(), overrides.clone());
        let _ = merge(&defaults, &overrides);
        assert_eq!(defaults, d_before);
        assert_eq!(overrides, o_before);
    }
}
