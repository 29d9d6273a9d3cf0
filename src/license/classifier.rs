use crate::models::LicenseRisk;

/// Classify an SPDX identifier or expression into a risk level.
///
/// - `OR` expressions take the most permissive component
/// - `AND` expressions take the most restrictive component
/// - `WITH` exception clauses are ignored; the base license decides
/// - outer parentheses are stripped
pub fn classify(expression: &str) -> LicenseRisk {
    let trimmed = expression
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .trim();

    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("unknown") {
        return LicenseRisk::Unknown;
    }

    let lower = trimmed.to_lowercase();
    if lower.contains("proprietary") || lower.contains("commercial") {
        return LicenseRisk::Proprietary;
    }

    if trimmed.contains(" OR ") {
        return trimmed
            .split(" OR ")
            .map(classify)
            .min_by_key(permissiveness)
            .unwrap_or(LicenseRisk::Unknown);
    }

    if trimmed.contains(" AND ") {
        return trimmed
            .split(" AND ")
            .map(classify)
            .max_by_key(permissiveness)
            .unwrap_or(LicenseRisk::Unknown);
    }

    let base = trimmed.split(" WITH ").next().unwrap_or(trimmed);
    classify_spdx_id(base)
}

/// Lower is more permissive. `Unknown` ranks between the copyleft classes and
/// `Proprietary` so that a known permissive alternative still wins an `OR`.
fn permissiveness(risk: &LicenseRisk) -> u8 {
    match risk {
        LicenseRisk::Permissive => 0,
        LicenseRisk::WeakCopyleft => 1,
        LicenseRisk::StrongCopyleft => 2,
        LicenseRisk::Unknown => 3,
        LicenseRisk::Proprietary => 4,
    }
}

/// Classify a single canonical SPDX identifier.
pub fn classify_spdx_id(id: &str) -> LicenseRisk {
    match id.trim().trim_end_matches('+') {
        "MIT" | "MIT-0" | "Apache-2.0" | "BSD-2-Clause" | "BSD-3-Clause" | "BSD-4-Clause"
        | "ISC" | "0BSD" | "Zlib" | "zlib-acknowledgement" | "Libpng" | "libpng-2.0"
        | "BSL-1.0" | "curl" | "OpenSSL" | "SSLeay" | "Unlicense" | "CC0-1.0" | "WTFPL"
        | "FTL" | "IJG" | "X11" | "NCSA" | "Python-2.0" | "PSF-2.0" => LicenseRisk::Permissive,

        "LGPL-2.0" | "LGPL-2.0-only" | "LGPL-2.0-or-later" | "LGPL-2.1" | "LGPL-2.1-only"
        | "LGPL-2.1-or-later" | "LGPL-3.0" | "LGPL-3.0-only" | "LGPL-3.0-or-later"
        | "MPL-2.0" | "EPL-1.0" | "EPL-2.0" | "CDDL-1.0" => LicenseRisk::WeakCopyleft,

        "GPL-2.0" | "GPL-2.0-only" | "GPL-2.0-or-later" | "GPL-3.0" | "GPL-3.0-only"
        | "GPL-3.0-or-later" | "AGPL-3.0" | "AGPL-3.0-only" | "AGPL-3.0-or-later" => {
            LicenseRisk::StrongCopyleft
        }

        _ => LicenseRisk::Unknown,
    }
}
