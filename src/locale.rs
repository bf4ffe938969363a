//! Locale recognition for file and folder names.
//!
//! The default [`LocaleTable`] accepts BCP 47 identifiers whose language subtag is a
//! known ISO 639 code and whose region subtag, when present, is a known ISO 3166 region.

use std::{collections::HashSet, str::FromStr};

use lazy_static::lazy_static;
use unic_langid::LanguageIdentifier;

use crate::traits::LocaleOracle;

const LANGUAGE_CODES: &str = "aa ab ae af ak am an ar as av ay az ba be bg bh bi bm bn bo br bs \
ca ce ch co cr cs cu cv cy da de dv dz ee el en eo es et eu fa ff fi fj fo fr fy ga gd gl gn gu \
gv ha he hi ho hr ht hu hy hz ia id ie ig ii ik io is it iu ja jv ka kg ki kj kk kl km kn ko kr \
ks ku kv kw ky la lb lg li ln lo lt lu lv mg mh mi mk ml mn mr ms mt my na nb nd ne ng nl nn no \
nr nv ny oc oj om or os pa pi pl ps pt qu rm rn ro ru rw sa sc sd se sg si sk sl sm sn so sq sr \
ss st su sv sw ta te tg th ti tk tl tn to tr ts tt tw ty ug uk ur uz ve vi vo wa wo xh yi yo za \
zh zu ast ceb chr ckb fil gsw haw kab kok mni sat yue";

const REGION_CODES: &str = "AD AE AF AG AI AL AM AO AQ AR AS AT AU AW AX AZ BA BB BD BE BF BG BH \
BI BJ BL BM BN BO BQ BR BS BT BV BW BY BZ CA CC CD CF CG CH CI CK CL CM CN CO CR CU CV CW CX CY \
CZ DE DJ DK DM DO DZ EC EE EG EH ER ES ET FI FJ FK FM FO FR GA GB GD GE GF GG GH GI GL GM GN GP \
GQ GR GS GT GU GW GY HK HM HN HR HT HU ID IE IL IM IN IO IQ IR IS IT JE JM JO JP KE KG KH KI KM \
KN KP KR KW KY KZ LA LB LC LI LK LR LS LT LU LV LY MA MC MD ME MF MG MH MK ML MM MN MO MP MQ MR \
MS MT MU MV MW MX MY MZ NA NC NE NF NG NI NL NO NP NR NU NZ OM PA PE PF PG PH PK PL PM PN PR PS \
PT PW PY QA RE RO RS RU RW SA SB SC SD SE SG SH SI SJ SK SL SM SN SO SR SS ST SV SX SY SZ TC TD \
TF TG TH TJ TK TL TM TN TO TR TT TV TW TZ UA UG UM US UY UZ VA VC VE VG VI VN VU WF WS XK YE YT \
ZA ZM ZW 419";

lazy_static! {
    static ref LANGUAGES: HashSet<&'static str> = LANGUAGE_CODES.split_whitespace().collect();
    static ref REGIONS: HashSet<&'static str> = REGION_CODES.split_whitespace().collect();
}

/// Table-backed [`LocaleOracle`].
#[derive(Debug, Clone, Default)]
pub struct LocaleTable {
    extra: Vec<String>,
}

impl LocaleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts additional codes verbatim (case-insensitive), e.g. project-specific
    /// pseudo locales such as `en-XA` or `pseudo`.
    pub fn with_extra<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra.extend(codes.into_iter().map(Into::into));
        self
    }

    fn extra_match(&self, candidate: &str) -> Option<String> {
        let normalized = candidate.replace('_', "-");
        self.extra
            .iter()
            .find(|code| code.replace('_', "-").eq_ignore_ascii_case(&normalized))
            .cloned()
    }
}

impl LocaleOracle for LocaleTable {
    fn locale(&self, candidate: &str) -> Option<String> {
        if candidate.is_empty() {
            return None;
        }
        if let Some(code) = self.extra_match(candidate) {
            return Some(code);
        }

        let canonical = candidate.replace('_', "-");
        let id = LanguageIdentifier::from_str(&canonical).ok()?;

        // "de-notes" parses as language `de` with variant `notes`
        if id.variants().len() > 0 {
            return None;
        }
        if !LANGUAGES.contains(id.language.as_str()) {
            return None;
        }
        if let Some(region) = id.region {
            if !REGIONS.contains(region.as_str()) {
                return None;
            }
        }
        Some(id.to_string())
    }
}
