//! Shared fixtures for integration tests.

/// Build a text-only PDF with one text object per line.
pub fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
    remit_core::pdf::write_text_pdf(pages).unwrap()
}

/// Lines of a one-page EOB whose trace amount line came out mirrored.
pub fn eob_lines() -> Vec<&'static str> {
    vec![
        "ACME MEDICAL GROUP",
        "450 HARBOR BLVD SUITE 200",
        "01.235$ :tnuomA ecarT",
        "Trace Number 8812345678",
        "Printed 03/14/2024",
        "Patient: JOHN SMITH   Claim 7781",
        "SERVICE PL NUM. SUBMITTED NEGOTIATED COPAY NOT DEDUCTIBLE",
        "DATES CODE CHARGES AMOUNT COVERED",
        "01/02/2024 99213 $150.00 $120.00",
        "01/02/2024 87070 $182.10 $150.00",
        "01/09/2024 J1100 $200.00 $262.10",
        "Claim Totals $532.10 $532.10",
    ]
}
