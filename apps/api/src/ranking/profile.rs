use crate::ranking::normalizer::normalize;

/// Profiles shorter than this (in characters, after trimming) are replaced by the default.
pub const MIN_PROFILE_CHARS: usize = 20;

/// Built-in ideal candidate for the data-analysis teaching assistant position.
pub const DEFAULT_PROFILE: &str = "
Buscamos estudiante para monitoría de Análisis de Datos con:
- Dominio de Python (Pandas, NumPy, Matplotlib)
- Conocimientos en estadística y análisis de datos
- Experiencia previa en enseñanza, tutorías o monitorías
- Excelente comunicación y paciencia
- Promedio superior a 4.0
- Capacidad para explicar conceptos complejos claramente
";

/// The comparison target for one ranking request. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetProfile {
    raw_text: String,
    normalized_text: String,
    is_default: bool,
}

impl TargetProfile {
    /// Uses `requested` verbatim when it is long enough, otherwise `default`.
    pub fn resolve(requested: Option<&str>, default: &str) -> Self {
        match requested {
            Some(text) if text.trim().chars().count() >= MIN_PROFILE_CHARS => {
                Self::build(text, false)
            }
            _ => Self::build(default, true),
        }
    }

    fn build(raw_text: &str, is_default: bool) -> Self {
        TargetProfile {
            raw_text: raw_text.to_string(),
            normalized_text: normalize(raw_text),
            is_default,
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn normalized_text(&self) -> &str {
        &self.normalized_text
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// First `max_chars` characters of the raw text, trimmed, for log lines.
    pub fn preview(&self, max_chars: usize) -> String {
        self.raw_text()
            .trim()
            .chars()
            .take(max_chars)
            .collect::<String>()
    }
}
