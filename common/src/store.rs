//! Mapa minor de OCP -> resultados, con merge y persistencia en JSON.

use std::{
    fs::{self, File},
    io::{self, BufWriter, ErrorKind, Write},
    path::Path,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::Result;
use crate::record::ResultRecord;

/// Nombre del archivo que consume el dashboard.
pub const DATA_FILE: &str = "ocp_data.json";

/// Resultados agrupados por la minor de OCP sacada del path del job.
///
/// Las claves conservan el orden de inserción, en memoria y al serializar.
/// Una clave presente siempre tiene al menos un resultado.
///
/// Los resultados se guardan como JSON crudo: lo que venga de un snapshot
/// previo se reescribe tal cual, aunque no tenga la forma de `ResultRecord`
/// (ej: `"status": null`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultStore {
    entries: IndexMap<String, Vec<Value>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Carga un snapshot previo. Si el archivo no existe se arranca vacío;
    /// si existe pero no se puede leer o no es un mapa de listas, es error
    /// (guardar encima borraría la historia).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("no hay datos previos en {}; arrancando vacío", path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut store: ResultStore = serde_json::from_str(&content)?;
        // no guardamos listas vacías aunque vengan en el archivo
        store.entries.retain(|_, records| !records.is_empty());
        for (key, records) in &store.entries {
            let incomplete = records
                .iter()
                .filter(|v| ResultRecord::deserialize(*v).is_err())
                .count();
            if incomplete > 0 {
                warn!("ocp_data[{}]: {} resultados previos incompletos, se conservan tal cual", key, incomplete);
            }
        }
        info!(
            "datos previos cargados de {} (claves: {:?})",
            path.display(),
            store.keys().collect::<Vec<_>>()
        );
        Ok(store)
    }

    /// Agrega un resultado al final de la lista de `key`.
    pub fn append(&mut self, key: impl Into<String>, record: ResultRecord) {
        let key = key.into();
        let records = self.entries.entry(key.clone()).or_default();
        records.push(record.into());
        info!("ocp_data[{}] ahora tiene {} resultados", key, records.len());
    }

    /// Cada clave de `fresh` reemplaza por completo la lista que hubiera en
    /// `self` para esa clave. Las claves que `fresh` no trae quedan igual.
    pub fn merge(&mut self, fresh: ResultStore) {
        for (key, records) in fresh.entries {
            if records.is_empty() {
                continue;
            }
            self.entries.insert(key, records);
        }
    }

    /// Escribe el mapa completo como JSON indentado con 4 espacios.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        // Crear carpeta de salida si hace falta
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_pretty(&mut writer)?;
        writer.flush()?;

        info!("datos guardados en {} (claves: {})", path.display(), self.len());
        Ok(())
    }

    fn write_pretty<W: io::Write>(&self, writer: W) -> Result<()> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
        self.serialize(&mut ser)?;
        Ok(())
    }

    /// Resultados crudos de una clave.
    pub fn get(&self, key: &str) -> Option<&[Value]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Resultados de una clave que tienen la forma completa de `ResultRecord`;
    /// los demás se saltean.
    pub fn records(&self, key: &str) -> Vec<ResultRecord> {
        self.get(key)
            .unwrap_or_default()
            .iter()
            .filter_map(|v| ResultRecord::deserialize(v).ok())
            .collect()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Cantidad de claves.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cantidad total de resultados sumando todas las claves.
    pub fn record_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}
