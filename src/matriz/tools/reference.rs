use std::path::Path;

use crate::matriz::tools::error::Result;
use crate::matriz::tools::normalize::normalize;

/// The place names recognised by the route matrices: departments, cities,
/// ports, and border crossings across Central America, in the fixed order
/// the matching reports them in.
pub const DEFAULT_PLACES: &[&str] = &[
    "AGUADULCE", "AHUACHAPAN", "ALAJUELA", "ALTA VERAPAZ",
    "AMATITLAN", "ANGUIATU", "ANTIGUA GUATEMALA", "ATLANTIDA",
    "BAJA VERAPAZ", "BELMOPAN", "BOACO", "BOCA DEL TORO",
    "BUENOS AIRES", "CABAÑAS", "CARAZO", "CARTAGO",
    "CATACAMAS", "CAÑAS", "CHALATENANGO", "CHAMPERICO",
    "CHANGUINOLA", "CHIMALTENANGO", "CHINANDEGA", "CHIQUIMULA",
    "CHIRIQUI", "CHITRE", "CHOLOMA", "CHOLUTECA",
    "CHONTALES", "CIUDAD DE GUATEMALA", "CIUDAD DE PANAMA", "CIUDAD HIDALGO",
    "CIUDAD QUEZADA", "CIUDAD TECUN UMAN", "COBAN", "COCLE",
    "COJUTEPEQUE", "COLON", "COLON HONDURAS", "COMAYAGUA",
    "COPAN", "CORTES", "CUILAPA", "CUSCATLAN",
    "DANLI", "DAVID", "DIRIAMBA", "EL PARAISO",
    "EL PROGRESO", "EL PROGRESO YORO", "EL ROBLE", "ESCUINTLA",
    "ESPARTA", "ESPARZA", "ESTELI", "FLORES",
    "FLORES DE LEAN", "FRANCISCO MORAZAN", "FRONTERA AGUA CALIENTE", "FRONTERA CORINTO",
    "FRONTERA EL AMATILLO", "FRONTERA EL CEIBO", "FRONTERA EL ESPINO", "FRONTERA EL FLORIDO",
    "FRONTERA EL POY", "FRONTERA GUASAULE", "FRONTERA LA ERMITA", "FRONTERA LA FRATERNIDAD",
    "FRONTERA LA HACHADURA", "FRONTERA LAS CHINAMAS", "FRONTERA LAS MANOS", "FRONTERA PASO CANOAS",
    "FRONTERA PEDRO DE ALVARADO", "FRONTERA PEÑAS BLANCAS", "FRONTERA SAN CRISTOBAL", "FRONTERA VALLE NUEVO",
    "GRACIAS", "GRANADA", "GUANACASTE", "GUAPILES",
    "GUASTATOYA", "HEREDIA", "HERRERA", "HUEHUETENANGO",
    "INTIBUCA", "IXCAN", "IZABAL", "JALAPA",
    "JINOTEGA", "JINOTEPE", "JUIGALPA", "JUTIAPA",
    "JUTICALPA", "LA CEIBA", "LA CHORRERA", "LA CRUZ",
    "LA ESPERANZA", "LA LIBERTAD AREA PUERTO", "LA LIBERTAD AREA SITIO DEL NIÑO", "LA PAZ EL SALVADOR",
    "LA PAZ HONDURAS", "LA UNION", "LAS TABLAS", "LEMPIRA",
    "LEON", "LIBERIA", "LIMON", "LOS SANTOS",
    "MADRIZ", "MANAGUA", "MASAYA", "MATAGALPA",
    "MAZATENANGO", "MELCHOR DE MENCOS", "METAPAN", "MIXCO",
    "MORALES", "MORAZAN", "NACAOME", "NANDAIME",
    "NICOYA", "NUEVA SEGOVIA", "OCOTAL", "OCOTEPEQUE",
    "OLANCHITO", "OLANCHO", "PALIN", "PALMEROLA",
    "PENOMOME", "PETEN", "PUERTO BARRIOS", "PUERTO CALDERA",
    "PUERTO CASTILLA", "PUERTO CORINTO", "PUERTO CORTES", "PUERTO DE ACAJUTLA",
    "PUERTO DE LA UNION", "PUERTO LIMON", "PUERTO QUETZAL", "PUERTO SANDINO",
    "PUERTO SANTO TOMAS DE CASTILLA", "PUNTARENAS", "QUETZALTENANGO", "QUICHE",
    "RETALHULEU", "RIO SAN JUAN", "RIVAS", "SABA",
    "SALAMA", "SAN CARLOS", "SAN FRANCISCO GOTERA", "SAN ISIDRO DE EL GENERAL",
    "SAN JOSE COSTA RICA", "SAN LORENZO", "SAN MARCOS", "SAN MIGUEL",
    "SAN PEDRO SOLOMA", "SAN PEDRO SULA", "SAN RAFAEL CEDROS", "SAN SALVADOR",
    "SAN VICENTE", "SANTA ANA", "SANTA BARBARA", "SANTA CRUZ",
    "SANTA CRUZ DEL QUICHE", "SANTA ROSA", "SANTA ROSA DE COPAN", "SANTIAGO",
    "SENSUNTEPEQUE", "SIGUATEPEQUE", "SIQUIRES", "SOLOLA",
    "SOMOTO", "SONSONATE", "TEGUCIGALPA", "TELA",
    "TOCOA", "TOTONICAPAN", "TRUJILLO", "USULUTAN",
    "VALLE", "VERAGUAS", "VILLA NUEVA GUATEMALA", "VILLANUEVA HONDURAS",
    "YORO", "YUSCARAN", "ZACAPA", "ZACATEPEQUEZ",
];

/// Reference set of canonical place names used for substring matching
/// against normalized text.
///
/// The built-in set mirrors the list the route matrices were authored
/// against; an external set can be loaded from a JSON array of strings so
/// deployments are not tied to the embedded data.
#[derive(Debug, Clone)]
pub struct PlaceList {
    entries: Vec<Place>,
}

#[derive(Debug, Clone)]
struct Place {
    canonical: String,
    normalized: String,
}

impl PlaceList {
    /// Builds the reference set from an iterator of canonical names,
    /// keeping their order. Normalized forms are computed once here.
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        let entries = names
            .into_iter()
            .map(|canonical| {
                let normalized = normalize(&canonical);
                Place {
                    canonical,
                    normalized,
                }
            })
            .collect();
        Self { entries }
    }

    /// The built-in reference set.
    pub fn builtin() -> Self {
        Self::new(DEFAULT_PLACES.iter().map(|name| name.to_string()))
    }

    /// Loads a reference set from a JSON file containing an array of
    /// place-name strings.
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let names: Vec<String> = serde_json::from_str(&data)?;
        Ok(Self::new(names))
    }

    /// Number of places in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the set holds no places.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns every place whose normalized name occurs as a substring of
    /// the given normalized text, in reference-list order and canonical
    /// spelling. The caller is expected to have normalized the text.
    pub fn matches_in<'a>(&'a self, normalized_text: &str) -> Vec<&'a str> {
        self.entries
            .iter()
            .filter(|place| normalized_text.contains(place.normalized.as_str()))
            .map(|place| place.canonical.as_str())
            .collect()
    }
}
