//! Static catalogue of dashboard sections and the quick-jump search over it.

use serde::Serialize;

/// One destination offered by the section search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub description: &'static str,
    pub href: &'static str,
    pub group: &'static str,
}

/// Items sharing a group, in catalogue order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavGroup {
    pub group: &'static str,
    pub items: Vec<NavItem>,
}

pub const NAVIGATION: &[NavItem] = &[
    NavItem {
        label: "Dashboard",
        description: "Resumen general del sistema",
        href: "/dashboard",
        group: "General",
    },
    NavItem {
        label: "Boletos",
        description: "eventos · viajes · tickets · pasajes · ventas · operación",
        href: "/dashboard/eventos",
        group: "Operación",
    },
    NavItem {
        label: "Convenios",
        description: "convenios · acuerdos · beneficios · alianzas · comerciales · empresas",
        href: "/dashboard/convenios",
        group: "Convenios y Beneficios",
    },
    NavItem {
        label: "Descuentos",
        description: "descuentos · promociones · rebajas · cupones · beneficios",
        href: "/dashboard/descuentos",
        group: "Convenios y Beneficios",
    },
    NavItem {
        label: "Empresas",
        description: "empresas · organizaciones · clientes · asociadas",
        href: "/dashboard/empresas",
        group: "Empresas",
    },
    NavItem {
        label: "Pasajeros",
        description: "pasajeros · viajeros · clientes · personas · rut",
        href: "/dashboard/pasajeros",
        group: "Pasajeros",
    },
];

fn matches(item: &NavItem, needle: &str) -> bool {
    item.label.to_lowercase().contains(needle)
        || item.description.to_lowercase().contains(needle)
        || item.group.to_lowercase().contains(needle)
}

/// Filters the catalogue by label, description or group.
///
/// Groups keep catalogue order and groups left without items are dropped. A
/// blank term returns the whole catalogue.
pub fn search_navigation(term: &str) -> Vec<NavGroup> {
    let needle = term.trim().to_lowercase();
    let mut groups: Vec<NavGroup> = Vec::new();

    for item in NAVIGATION.iter().filter(|item| matches(item, &needle)) {
        match groups.iter_mut().find(|group| group.group == item.group) {
            Some(group) => group.items.push(*item),
            None => groups.push(NavGroup {
                group: item.group,
                items: vec![*item],
            }),
        }
    }

    groups
}

/// First item whose label contains `term`, used when the user presses Enter.
pub fn first_match(term: &str) -> Option<&'static NavItem> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    NAVIGATION
        .iter()
        .find(|item| item.label.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_term_lists_every_group() {
        let groups = search_navigation("");
        let names: Vec<_> = groups.iter().map(|g| g.group).collect();
        assert_eq!(
            names,
            [
                "General",
                "Operación",
                "Convenios y Beneficios",
                "Empresas",
                "Pasajeros"
            ]
        );
        assert_eq!(groups[2].items.len(), 2);
    }

    #[test]
    fn description_matches_are_grouped() {
        let groups = search_navigation("BENEFICIOS");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group, "Convenios y Beneficios");
        assert_eq!(groups[0].items.len(), 2);
    }

    #[test]
    fn unknown_term_yields_no_groups() {
        assert!(search_navigation("facturación").is_empty());
    }

    #[test]
    fn first_match_only_looks_at_labels() {
        assert_eq!(first_match("desc").map(|i| i.href), Some("/dashboard/descuentos"));
        // "tickets" only appears in a description.
        assert_eq!(first_match("tickets"), None);
        assert_eq!(first_match("   "), None);
    }
}
