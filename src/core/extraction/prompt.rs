//! Instructions and few-shot examples for German business pages

use crate::core::models::CompanyInfo;

/// Texts shorter than this, after trimming, are not sent for extraction
pub const MIN_TEXT_LENGTH: usize = 10;

/// System instructions
pub const ABOUT_PROMPT: &str = "\
Du bist ein deutscher Business-Informations-Extraktor.
Extrahiere Firmen-/Praxisdaten aus Impressum / Kontakt / About-Us Texten.

Regeln:
- Nutze NUR explizit im Text vorhandene Informationen.
- Wenn ein Feld fehlt, setze es auf leere Zeichenkette \"\".
- Nutze E-Mails mit Personbezug vor generischen (info@, kontakt@).
- Erkenne deutsche Begriffe wie: Impressum, Angaben gemäß § 5 TMG,
  Geschäftsführer, Inhaber, Praxisinhaber, Zahnärztin, Rechtsanwalt, GmbH, AG usw.

Antworte ausschließlich mit einem JSON-Objekt mit folgenden Feldern:
- owner_name: Name des Inhabers/Geschäftsführers
- position: Position (z.B. Geschäftsführer, Inhaber)
- company_name: Firmenname
- email: E-Mail-Adresse (bevorzuge persönliche E-Mails)
- phone: Telefonnummer
- fax: Faxnummer
- website: Website-URL
- profession: Berufsbezeichnung (z.B. Dr. med. dent., Rechtsanwalt)
- sector: Branche (z.B. Dentistry, Legal, Consulting)
";

/// Example page text with the record expected for it
#[derive(Debug, Clone)]
pub struct FewShotExample {
    pub text: &'static str,
    pub record: CompanyInfo,
}

fn record(fields: [&str; 9]) -> CompanyInfo {
    let [
        owner_name,
        position,
        company_name,
        email,
        phone,
        fax,
        website,
        profession,
        sector,
    ] = fields.map(str::to_string);
    CompanyInfo {
        owner_name,
        position,
        company_name,
        email,
        phone,
        fax,
        website,
        profession,
        sector,
    }
}

/// Examples sent ahead of every request
pub fn few_shot_examples() -> Vec<FewShotExample> {
    vec![
        FewShotExample {
            text: "Impressum\nMustermann GmbH\nGeschäftsführer: Hans Müller\nE-Mail: h.mueller@mustermann.de",
            record: record([
                "Hans Müller",
                "Geschäftsführer",
                "Mustermann GmbH",
                "h.mueller@mustermann.de",
                "",
                "",
                "",
                "",
                "",
            ]),
        },
        FewShotExample {
            text: "Angaben gemäß § 5 TMG: Zahnärztin Dr. Claudia Becker, Telefon: (0441) 560015-0, \
                   Telefax: (0441) 560015-4, E-Mail: praxis@dr-claudia-becker.de, \
                   Internet: www.dr-claudia-becker.de",
            record: record([
                "Claudia Becker",
                "Zahnärztin",
                "",
                "praxis@dr-claudia-becker.de",
                "(0441) 560015-0",
                "(0441) 560015-4",
                "www.dr-claudia-becker.de",
                "Dr. med. dent.",
                "Dentistry",
            ]),
        },
        FewShotExample {
            text: "Rechtsanwaltskanzlei Schmidt & Partner\nInhaber: RA Dr. jur. Michael Schmidt\n\
                   Kontakt: m.schmidt@ra-schmidt.de\nTel: +49 30 123456",
            record: record([
                "Michael Schmidt",
                "Inhaber",
                "Rechtsanwaltskanzlei Schmidt & Partner",
                "m.schmidt@ra-schmidt.de",
                "+49 30 123456",
                "",
                "",
                "Rechtsanwalt Dr. jur.",
                "Legal",
            ]),
        },
    ]
}
