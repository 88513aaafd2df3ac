//! Static descriptions of the interactive demos offered on the page.
//!
//! Buttons name a demo through `data-demo`; the catalog maps that id to the
//! content shown in the demo modal. The catalog is checked once at startup.

use std::str::FromStr;

use crate::error::{PageError, Result};

pub const DEMO_ATTR: &str = "data-demo";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemoId {
    DrugDiscovery,
    MaterialsScience,
    Bioinformatics,
    QuantumChemistry,
}

impl DemoId {
    pub const ALL: [DemoId; 4] = [
        DemoId::DrugDiscovery,
        DemoId::MaterialsScience,
        DemoId::Bioinformatics,
        DemoId::QuantumChemistry,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DemoId::DrugDiscovery => "drug-discovery",
            DemoId::MaterialsScience => "materials-science",
            DemoId::Bioinformatics => "bioinformatics",
            DemoId::QuantumChemistry => "quantum-chemistry",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDemo(pub String);

impl FromStr for DemoId {
    type Err = UnknownDemo;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        DemoId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownDemo(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoDescriptor {
    pub id: DemoId,
    pub title: &'static str,
    pub body: &'static str,
    pub features: &'static [&'static str],
}

static DEMOS: [DemoDescriptor; 4] = [
    DemoDescriptor {
        id: DemoId::DrugDiscovery,
        title: "Drug Discovery Demo",
        body: "See how AI predicts molecular activity and streamlines drug design...",
        features: &["Molecular property prediction", "Target identification", "ADMET prediction"],
    },
    DemoDescriptor {
        id: DemoId::MaterialsScience,
        title: "Materials Science Demo",
        body: "See how AI predicts material properties and designs new functional materials...",
        features: &["Crystal structure prediction", "Material property calculation", "New material design"],
    },
    DemoDescriptor {
        id: DemoId::Bioinformatics,
        title: "Bioinformatics Demo",
        body: "See how AI analyses genomic data and predicts protein structures...",
        features: &["Protein structure prediction", "Gene function analysis", "Biological network modelling"],
    },
    DemoDescriptor {
        id: DemoId::QuantumChemistry,
        title: "Quantum Chemistry Demo",
        body: "See how AI accelerates quantum chemistry calculations and predicts molecular properties...",
        features: &["Potential energy surfaces", "Reaction path prediction", "Spectrum prediction"],
    },
];

#[derive(Debug, Clone, Copy)]
pub struct DemoCatalog {
    entries: &'static [DemoDescriptor],
}

impl DemoCatalog {
    /// The built-in catalog, checked for completeness.
    pub fn builtin() -> Result<Self> {
        let catalog = Self { entries: &DEMOS };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        for id in DemoId::ALL {
            let matching = self.entries.iter().filter(|d| d.id == id).count();
            if matching != 1 {
                return Err(PageError::Catalog(format!(
                    "{} has {} entries",
                    id.as_str(),
                    matching
                )));
            }
        }
        for demo in self.entries {
            if demo.title.is_empty() || demo.body.is_empty() || demo.features.is_empty() {
                return Err(PageError::Catalog(format!("{} is missing content", demo.id.as_str())));
            }
        }
        Ok(())
    }

    pub fn get(&self, id: DemoId) -> Option<&'static DemoDescriptor> {
        self.entries.iter().find(|d| d.id == id)
    }

    /// Looks up a raw `data-demo` value.
    pub fn lookup(&self, raw: &str) -> std::result::Result<&'static DemoDescriptor, UnknownDemo> {
        let id = raw.parse::<DemoId>()?;
        self.get(id).ok_or_else(|| UnknownDemo(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_complete() {
        let catalog = DemoCatalog::builtin().unwrap();
        for id in DemoId::ALL {
            let demo = catalog.get(id).unwrap();
            assert_eq!(demo.id, id);
            assert_eq!(demo.features.len(), 3);
        }
    }

    #[test]
    fn ids_round_trip_through_markup_names() {
        for id in DemoId::ALL {
            assert_eq!(id.as_str().parse::<DemoId>(), Ok(id));
        }
    }

    #[test]
    fn unknown_id_finds_nothing() {
        let catalog = DemoCatalog::builtin().unwrap();
        assert!(catalog.lookup("astrophysics").is_err());
        assert!(catalog.lookup("").is_err());
        assert!(catalog.lookup("Drug-Discovery").is_err());
        assert_eq!(
            "astrophysics".parse::<DemoId>(),
            Err(UnknownDemo("astrophysics".to_string()))
        );
    }

    #[test]
    fn lookup_finds_known_demo() {
        let catalog = DemoCatalog::builtin().unwrap();
        let demo = catalog.lookup("bioinformatics").unwrap();
        assert_eq!(demo.title, "Bioinformatics Demo");
    }

    #[test]
    fn incomplete_catalog_fails_validation() {
        static BROKEN: [DemoDescriptor; 1] = [DemoDescriptor {
            id: DemoId::DrugDiscovery,
            title: "t",
            body: "b",
            features: &["f"],
        }];
        let catalog = DemoCatalog { entries: &BROKEN };
        assert!(matches!(catalog.validate(), Err(PageError::Catalog(_))));
    }
}
