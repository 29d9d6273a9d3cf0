use anyhow::Result;
use regex::Regex;

/// Well-known license phrases, most specific first. The first match wins.
///
/// The GNU family is matched on its title line: the license bodies mention
/// each other ("Use with the GNU Affero General Public License", "covered by
/// the GNU Library General Public License instead").
const PHRASES: &[(&str, &str)] = &[
    (
        r"^\s*GNU\s+AFFERO\s+GENERAL\s+PUBLIC\s+LICENSE\s+Version\s+3",
        "AGPL-3.0",
    ),
    (
        r"^\s*GNU\s+LESSER\s+GENERAL\s+PUBLIC\s+LICENSE\s+Version\s+2\.1",
        "LGPL-2.1",
    ),
    (
        r"^\s*GNU\s+LESSER\s+GENERAL\s+PUBLIC\s+LICENSE\s+Version\s+3",
        "LGPL-3.0",
    ),
    (r"^\s*GNU\s+GENERAL\s+PUBLIC\s+LICENSE\s+Version\s+3", "GPL-3.0"),
    (r"^\s*GNU\s+GENERAL\s+PUBLIC\s+LICENSE\s+Version\s+2", "GPL-2.0"),
    (
        r"^\s*GNU\s+LIBRARY\s+GENERAL\s+PUBLIC\s+LICENSE\s+Version\s+2",
        "LGPL-2.0",
    ),
    (r"Mozilla\s+Public\s+License,?\s+(?:v\.\s*|Version\s+)2\.0", "MPL-2.0"),
    (r"Apache\s+License,?\s+Version\s+2\.0", "Apache-2.0"),
    (r"Boost\s+Software\s+License", "BSL-1.0"),
    (r"COPYRIGHT\s+AND\s+PERMISSION\s+NOTICE", "curl"),
    (
        r"This\s+is\s+free\s+and\s+unencumbered\s+software\s+released\s+into\s+the\s+public\s+domain",
        "Unlicense",
    ),
    (
        r"This\s+software\s+is\s+provided\s+'as-is',\s+without\s+any\s+express\s+or\s+implied\s+warranty",
        "Zlib",
    ),
    (
        r"Permission\s+to\s+use,\s+copy,\s+modify,\s+and(?:/or)?\s+distribute\s+this\s+software\s+for\s+any\s+purpose",
        "ISC",
    ),
    (r"Permission\s+is\s+hereby\s+granted,\s+free\s+of\s+charge", "MIT"),
    (
        r"Redistribution\s+and\s+use\s+in\s+source\s+and\s+binary\s+forms[\s\S]*Neither\s+the\s+name",
        "BSD-3-Clause",
    ),
    (
        r"Redistribution\s+and\s+use\s+in\s+source\s+and\s+binary\s+forms",
        "BSD-2-Clause",
    ),
];

/// Finds the SPDX identifier of free-form copyright text.
pub struct LicenseDetector {
    spdx_tag: Regex,
    phrases: Vec<(Regex, &'static str)>,
}

impl LicenseDetector {
    pub fn new() -> Result<Self> {
        let spdx_tag = Regex::new(r"(?m)SPDX-License-Identifier:\s*(.+?)\s*(?:\*/)?\s*$")?;
        let phrases = PHRASES
            .iter()
            .map(|(pattern, id)| {
                Ok::<_, anyhow::Error>((Regex::new(&format!("(?im){pattern}"))?, *id))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { spdx_tag, phrases })
    }

    /// An explicit `SPDX-License-Identifier:` tag wins over phrase matching.
    pub fn detect_license(&self, text: &str) -> Option<String> {
        if let Some(caps) = self.spdx_tag.captures(text) {
            return Some(caps[1].to_string());
        }

        self.phrases
            .iter()
            .find(|(re, _)| re.is_match(text))
            .map(|(_, id)| id.to_string())
    }
}

/// Join the distinct ids detected for one package with ` AND `, keeping the
/// order in which they were first seen.
pub fn combine<I>(ids: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    let mut distinct: Vec<String> = Vec::new();
    for id in ids {
        if !distinct.contains(&id) {
            distinct.push(id);
        }
    }

    match distinct.len() {
        0 => None,
        1 => distinct.pop(),
        _ => Some(
            distinct
                .iter()
                .map(|id| {
                    if id.contains(" OR ") {
                        format!("({id})")
                    } else {
                        id.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(" AND "),
        ),
    }
}
