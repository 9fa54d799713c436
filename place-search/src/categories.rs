//! Static catalog of place categories.
//!
//! Each UI label maps to one provider category code, or to several when a
//! single label spans more than one branch of the provider taxonomy
//! (e.g. `Shopping`). Lookups are exact and case-sensitive.

use std::fmt;

use serde::Serialize;

/// Opaque provider category token, e.g. `100-1000-0000`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CategoryCode(String);

impl CategoryCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One code or an ordered list of codes for a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CategoryCodes {
    Single(CategoryCode),
    Many(Vec<CategoryCode>),
}

impl CategoryCodes {
    /// The codes as an ordered sequence (a single code becomes a one-element slice).
    pub fn as_slice(&self) -> &[CategoryCode] {
        match self {
            CategoryCodes::Single(code) => std::slice::from_ref(code),
            CategoryCodes::Many(codes) => codes,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl From<CategoryCode> for CategoryCodes {
    fn from(code: CategoryCode) -> Self {
        CategoryCodes::Single(code)
    }
}

impl From<Vec<CategoryCode>> for CategoryCodes {
    fn from(codes: Vec<CategoryCode>) -> Self {
        CategoryCodes::Many(codes)
    }
}

/// Codes as stored in the static catalog.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum CatalogCodes {
    One(&'static str),
    Several(&'static [&'static str]),
}

impl CatalogCodes {
    fn to_codes(self) -> CategoryCodes {
        match self {
            CatalogCodes::One(code) => CategoryCodes::Single(code.into()),
            CatalogCodes::Several(codes) => {
                CategoryCodes::Many(codes.iter().map(|c| CategoryCode::from(*c)).collect())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CategoryEntry {
    pub label: &'static str,
    pub codes: CatalogCodes,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CategoryGroup {
    pub name: &'static str,
    pub entries: &'static [CategoryEntry],
}

const fn one(label: &'static str, code: &'static str) -> CategoryEntry {
    CategoryEntry {
        label,
        codes: CatalogCodes::One(code),
    }
}

const fn several(label: &'static str, codes: &'static [&'static str]) -> CategoryEntry {
    CategoryEntry {
        label,
        codes: CatalogCodes::Several(codes),
    }
}

/// Built-in catalog, in display order.
pub static BUILTIN_CATALOG: &[CategoryGroup] = &[
    CategoryGroup {
        name: "Food & Dining",
        entries: &[
            one("Restaurants", "100-1000-0000"),
            one("Fine Dining", "100-1000-0002"),
            one("Take-Out & Delivery", "100-1000-0003"),
            one("Fast Food", "100-1000-0009"),
            one("Coffee Shops", "100-1100-0010"),
            one("Tea Houses", "100-1100-0331"),
            one("Bars & Pubs", "200-2000-0011"),
            one("Bakeries", "600-6300-0244"),
        ],
    },
    CategoryGroup {
        name: "Accommodation",
        entries: &[
            one("Hotels", "500-5000-0053"),
            one("Motels", "500-5000-0054"),
            one("Campgrounds", "500-5100-0056"),
            one("Bed & Breakfast", "500-5100-0058"),
            one("Hostels", "500-5100-0055"),
        ],
    },
    CategoryGroup {
        name: "Entertainment & Culture",
        entries: &[
            one("Cinemas", "200-2100-0019"),
            one("Theaters", "200-2200-0000"),
            one("Casinos", "200-2300-0021"),
            one("Concert Venues", "200-2200-0020"),
            one("Museums", "300-3100-0000"),
            one("Art Galleries", "300-3000-0024"),
            one("Historical Monuments", "300-3000-0025"),
            one("Religious Places", "300-3200-0000"),
            one("Wineries", "300-3000-0065"),
            one("Breweries", "300-3000-0350"),
        ],
    },
    CategoryGroup {
        name: "Outdoor & Recreation",
        entries: &[
            one("Parks", "550-5510-0202"),
            one("Beaches", "550-5510-0205"),
            one("Recreation Centers", "550-5510-0206"),
            one("Scenic Points", "550-5510-0242"),
            one("Campsites", "550-5510-0378"),
            one("Amusement Parks", "550-5520-0207"),
            one("Water Parks", "550-5520-0357"),
            one("Ski Resorts", "550-5520-0212"),
            one("Zoos", "550-5520-0208"),
            one("Aquariums", "550-5520-0211"),
        ],
    },
    CategoryGroup {
        name: "Shopping",
        entries: &[
            several(
                "Shopping",
                &[
                    "600-6100-0062",
                    "600-6200-0063",
                    "600-6000-0061",
                    "600-6300-0066",
                ],
            ),
            one("Shopping Malls", "600-6100-0062"),
            one("Department Stores", "600-6200-0063"),
            one("Convenience Stores", "600-6000-0061"),
            one("Grocery Stores", "600-6300-0066"),
            one("Wine & Liquor", "600-6300-0068"),
            one("Bookstores", "600-6700-0087"),
            one("Clothing & Accessories", "600-6800-0000"),
            one("Hardware & Garden", "600-6600-0000"),
        ],
    },
    CategoryGroup {
        name: "Transportation",
        entries: &[
            one("Airports", "400-4000-4581"),
            one("Train Stations", "400-4100-0035"),
            one("Bus Stations", "400-4100-0036"),
            one("Local Transit", "400-4100-0043"),
            one("Bike Sharing", "400-4100-0347"),
            one("Rest Areas", "400-4300-0000"),
            one("Parking", "800-8500-0000"),
        ],
    },
    CategoryGroup {
        name: "Services",
        entries: &[
            one("Banks", "700-7000-0107"),
            one("ATMs", "700-7010-0108"),
            one("Post Offices", "700-7450-0114"),
            one("Gas Stations", "700-7600-0000"),
            one("Car Repair", "700-7850-0000"),
            one("Car Rental", "700-7851-0117"),
            one("Hair & Beauty", "600-6950-0000"),
            one("Pharmacies", "600-6400-0000"),
        ],
    },
    CategoryGroup {
        name: "Nature & Geography",
        entries: &[
            one("Bodies of Water", "350-3500-0233"),
            one("Mountains & Hills", "350-3510-0236"),
            one("Forests", "350-3522-0239"),
            one("Natural Features", "350-3550-0336"),
        ],
    },
    CategoryGroup {
        name: "Public Services",
        entries: &[
            one("Hospitals", "800-8000-0000"),
            one("Police Stations", "700-7300-0111"),
            one("Libraries", "800-8300-0175"),
            one("Schools", "800-8250-0000"),
            one("Government Offices", "800-8100-0000"),
            one("Event Spaces", "800-8400-0000"),
            one("Sports Facilities", "800-8600-0000"),
        ],
    },
];

/// Read-only label → codes lookup.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRegistry {
    groups: &'static [CategoryGroup],
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::new(BUILTIN_CATALOG)
    }
}

impl CategoryRegistry {
    pub fn new(groups: &'static [CategoryGroup]) -> Self {
        Self { groups }
    }

    /// Codes for an exact label, `None` when unknown (callers must not query).
    ///
    /// Groups are scanned in catalog order; the first match wins.
    pub fn codes_for(&self, label: &str) -> Option<CategoryCodes> {
        self.groups
            .iter()
            .flat_map(|g| g.entries.iter())
            .find(|e| e.label == label)
            .map(|e| e.codes.to_codes())
    }

    pub fn groups(&self) -> &'static [CategoryGroup] {
        self.groups
    }
}
