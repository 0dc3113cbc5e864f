//! Crop catalog and the crops grown in each department

use serde::Serialize;

use crate::error::DomainError;

/// A crop the dashboard can advise on
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Crop {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

impl Crop {
    /// Icon and name, e.g. "🌽 Maíz"
    pub fn label(&self) -> String {
        format!("{} {}", self.icon, self.name)
    }
}

const fn crop(id: &'static str, name: &'static str, icon: &'static str) -> Crop {
    Crop { id, name, icon }
}

/// Every crop, in catalog order
pub static CROP_CATALOG: [Crop; 12] = [
    crop("maiz", "Maíz", "🌽"),
    crop("frijol", "Frijol", "🫘"),
    crop("cafe", "Café", "☕"),
    crop("cardamomo", "Cardamomo", "🌿"),
    crop("cana", "Caña de Azúcar", "🎋"),
    crop("banano", "Banano", "🍌"),
    crop("hortalizas", "Hortalizas", "🥬"),
    crop("tomate", "Tomate", "🍅"),
    crop("papa", "Papa", "🥔"),
    crop("trigo", "Trigo", "🌾"),
    crop("brocoli", "Brócoli", "🥦"),
    crop("aguacate", "Aguacate", "🥑"),
];

/// Crop used when nothing else is selected
pub const DEFAULT_CROP_ID: &str = "maiz";

/// Crop ids grown in each department, keyed by department name
pub static DEPARTMENT_CROPS: [(&str, &[&str]); 22] = [
    ("Alta Verapaz", &["maiz", "frijol", "cafe", "cardamomo", "hortalizas", "aguacate"]),
    ("Baja Verapaz", &["maiz", "frijol", "cafe", "hortalizas", "tomate", "aguacate"]),
    ("Chimaltenango", &["maiz", "frijol", "cafe", "hortalizas", "brocoli", "aguacate"]),
    ("Chiquimula", &["maiz", "frijol", "tomate", "hortalizas"]),
    ("Petén", &["maiz", "frijol", "cardamomo"]),
    ("El Progreso", &["maiz", "frijol", "tomate", "hortalizas"]),
    ("Quiché", &["maiz", "frijol", "cafe", "cardamomo", "papa", "trigo"]),
    ("Escuintla", &["maiz", "frijol", "cana", "banano", "hortalizas"]),
    ("Guatemala", &["maiz", "frijol", "hortalizas", "cafe", "aguacate"]),
    ("Huehuetenango", &["maiz", "frijol", "cafe", "cardamomo", "papa", "trigo"]),
    ("Izabal", &["maiz", "frijol", "cardamomo", "banano", "hortalizas"]),
    ("Jalapa", &["maiz", "frijol", "cafe", "tomate", "aguacate"]),
    ("Jutiapa", &["maiz", "frijol", "tomate", "hortalizas"]),
    ("Quetzaltenango", &["maiz", "frijol", "cafe", "papa", "trigo", "hortalizas", "brocoli"]),
    ("Retalhuleu", &["maiz", "frijol", "cana", "banano", "hortalizas"]),
    ("Sacatepéquez", &["maiz", "frijol", "cafe", "hortalizas", "brocoli", "aguacate"]),
    ("San Marcos", &["maiz", "frijol", "cafe", "papa", "trigo", "banano"]),
    ("Santa Rosa", &["maiz", "frijol", "cafe", "cana", "tomate"]),
    ("Sololá", &["maiz", "frijol", "cafe", "papa", "hortalizas"]),
    ("Suchitepéquez", &["maiz", "frijol", "cana", "banano", "hortalizas"]),
    ("Totonicapán", &["maiz", "frijol", "papa", "trigo"]),
    ("Zacapa", &["maiz", "frijol", "tomate", "hortalizas"]),
];

fn crop_ids_for(department_name: &str) -> &'static [&'static str] {
    DEPARTMENT_CROPS
        .iter()
        .find(|(name, _)| *name == department_name)
        .map(|(_, ids)| *ids)
        .unwrap_or(&[])
}

/// Look up a crop by id
pub fn find_crop(id: &str) -> Result<&'static Crop, DomainError> {
    CROP_CATALOG
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| DomainError::UnknownCrop(id.to_string()))
}

/// Crops grown in a department, in catalog order.
///
/// An unknown department yields an empty list.
pub fn crops_by_department(department_name: &str) -> Vec<&'static Crop> {
    let ids = crop_ids_for(department_name);
    CROP_CATALOG.iter().filter(|c| ids.contains(&c.id)).collect()
}

/// Union of crops grown across departments, in catalog order.
///
/// No departments means no restriction: the full catalog is returned.
pub fn crops_for_departments(department_names: &[&str]) -> Vec<&'static Crop> {
    if department_names.is_empty() {
        return CROP_CATALOG.iter().collect();
    }

    CROP_CATALOG
        .iter()
        .filter(|c| {
            department_names
                .iter()
                .any(|name| crop_ids_for(name).contains(&c.id))
        })
        .collect()
}

/// Crops selectable for an optional department selection
pub fn available_crops(department_name: Option<&str>) -> Vec<&'static Crop> {
    match department_name {
        Some(name) => crops_by_department(name),
        None => CROP_CATALOG.iter().collect(),
    }
}

/// Constrain a crop selection to what the selected department grows.
///
/// A selection outside the allowed set falls back to the first allowed crop,
/// then to the catalog default.
pub fn resolve_crop(crop_id: &str, department_name: Option<&str>) -> &'static Crop {
    let allowed = available_crops(department_name);

    allowed
        .iter()
        .find(|c| c.id == crop_id)
        .or_else(|| allowed.first())
        .copied()
        .unwrap_or(&CROP_CATALOG[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::region::DEPARTMENTS;

    fn ids(crops: &[&Crop]) -> Vec<&'static str> {
        crops.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_peten_crops_in_catalog_order() {
        assert_eq!(ids(&crops_by_department("Petén")), vec!["maiz", "frijol", "cardamomo"]);
    }

    #[test]
    fn test_catalog_order_not_config_order() {
        // Guatemala lists hortalizas before cafe; catalog order puts cafe first
        assert_eq!(
            ids(&crops_by_department("Guatemala")),
            vec!["maiz", "frijol", "cafe", "hortalizas", "aguacate"]
        );
    }

    #[test]
    fn test_unknown_department_has_no_crops() {
        assert!(crops_by_department("Belice").is_empty());
    }

    #[test]
    fn test_every_department_has_crop_list() {
        for d in DEPARTMENTS.iter() {
            assert!(!crops_by_department(d.name).is_empty(), "{}", d.name);
        }
    }

    #[test]
    fn test_configured_ids_exist_in_catalog() {
        for (name, crop_ids) in DEPARTMENT_CROPS.iter() {
            for id in crop_ids.iter() {
                assert!(find_crop(id).is_ok(), "{} lists unknown crop {}", name, id);
            }
        }
    }

    #[test]
    fn test_union_of_departments() {
        assert_eq!(crops_for_departments(&[]).len(), CROP_CATALOG.len());
        assert_eq!(
            ids(&crops_for_departments(&["Petén", "Escuintla"])),
            vec!["maiz", "frijol", "cardamomo", "cana", "banano", "hortalizas"]
        );
    }

    #[test]
    fn test_resolve_crop() {
        assert_eq!(resolve_crop("cardamomo", Some("Petén")).id, "cardamomo");
        assert_eq!(resolve_crop("cafe", Some("Petén")).id, "maiz");
        assert_eq!(resolve_crop("cafe", None).id, "cafe");
        assert_eq!(resolve_crop("nope", None).id, "maiz");
        assert_eq!(resolve_crop("cafe", Some("Belice")).id, "maiz");
    }

    #[test]
    fn test_crop_label() {
        assert_eq!(find_crop("papa").unwrap().label(), "🥔 Papa");
    }
}
