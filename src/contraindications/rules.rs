use crate::models::ContraindicationCategory::{
    self, Assessment, Cardiovascular, Demographic, Medication, Psychiatric,
};
use crate::models::{ContraindicationSeverity, IntakeScreeningData};

use super::types::ContraindicationFlag;

const MAOI_DRUGS: &[&str] = &[
    "phenelzine",
    "tranylcypromine",
    "selegiline",
    "isocarboxazid",
    "maoi",
    "nardil",
    "parnate",
    "emsam",
    "marplan",
];

const PSYCHOSIS_TERMS: &[&str] = &[
    "schizophrenia",
    "schizoaffective",
    "psychosis",
    "psychotic episode",
    "psychotic disorder",
];

const FIRST_DEGREE_RELATIVES: &[&str] = &[
    "parent",
    "mother",
    "father",
    "sibling",
    "brother",
    "sister",
    "first-degree",
];

const BPD_TERMS: &[&str] = &["bpd", "borderline personality", "emotionally unstable personality"];

const SUD_TERMS: &[&str] = &[
    "alcohol use disorder",
    "aud",
    "opioid use disorder",
    "cocaine use disorder",
    "stimulant use disorder",
    "substance use disorder",
    "sud",
];

const SSRI_DRUGS: &[&str] = &[
    "ssri",
    "sertraline",
    "fluoxetine",
    "escitalopram",
    "citalopram",
    "paroxetine",
    "fluvoxamine",
    "zoloft",
    "prozac",
    "lexapro",
    "paxil",
];

const STIMULANT_DRUGS: &[&str] = &[
    "adderall",
    "amphetamine",
    "dextroamphetamine",
    "methamphetamine",
    "vyvanse",
    "lisdexamfetamine",
    "ritalin",
    "methylphenidate",
    "concerta",
];

/// C-SSRS ideation with intent and plan.
pub const CSSRS_ABSOLUTE_SCORE: u16 = 4;
/// Oregon minimum client age.
pub const MINIMUM_AGE_YEARS: u32 = 21;
pub const MDMA_SYSTOLIC_ABSOLUTE: f64 = 160.0;
pub const SYSTOLIC_RELATIVE: f64 = 150.0;
pub const PHQ9_EXTREME: u16 = 24;
pub const GAD7_EXTREME: u16 = 18;
pub const PCL5_EXTREME: u16 = 60;
pub const LOW_BMI: f64 = 17.5;

/// Substring match, case-insensitive: any entry containing any term.
fn matches_any(entries: &[String], terms: &[&str]) -> bool {
    entries.iter().any(|entry| {
        let entry = entry.to_lowercase();
        terms.iter().any(|term| entry.contains(term))
    })
}

fn flag(
    id: &str,
    severity: ContraindicationSeverity,
    category: ContraindicationCategory,
    headline: String,
    detail: &str,
    source: &str,
    regulatory_basis: &str,
) -> ContraindicationFlag {
    ContraindicationFlag {
        id: id.to_string(),
        severity,
        category,
        headline,
        detail: detail.to_string(),
        source: source.to_string(),
        regulatory_basis: regulatory_basis.to_string(),
    }
}

fn absolute(
    id: &str,
    category: ContraindicationCategory,
    headline: String,
    detail: &str,
    source: &str,
    regulatory_basis: &str,
) -> ContraindicationFlag {
    flag(id, ContraindicationSeverity::Absolute, category, headline, detail, source, regulatory_basis)
}

fn relative(
    id: &str,
    category: ContraindicationCategory,
    headline: String,
    detail: &str,
    source: &str,
    regulatory_basis: &str,
) -> ContraindicationFlag {
    flag(id, ContraindicationSeverity::Relative, category, headline, detail, source, regulatory_basis)
}

fn mdma_hypertensive(data: &IntakeScreeningData) -> bool {
    data.is_mdma_session()
        && data
            .last_systolic_bp
            .is_some_and(|sbp| sbp > MDMA_SYSTOLIC_ABSOLUTE)
}

// ---------------------------------------------------------------------------
// Absolute rules
// ---------------------------------------------------------------------------

/// Rules that block the session outright, in a fixed order.
pub fn check_absolute_contraindications(data: &IntakeScreeningData) -> Vec<ContraindicationFlag> {
    let mut flags = Vec::new();

    if matches_any(&data.medications, &["lithium"]) {
        flags.push(absolute(
            "ABS-MEDICATION-LITHIUM",
            Medication,
            "Active lithium detected - session contraindicated".into(),
            "Concurrent lithium use significantly elevates risk of serotonin syndrome and cardiac arrhythmia with serotonergic psychedelics. Lithium must be discontinued under physician supervision before any session.",
            "Baseline Observations - Medication List",
            "OHA OAR 333-333-4020(3)(c); MAPS Protocol S2 §8.3.1",
        ));
    }

    if matches_any(&data.medications, MAOI_DRUGS) {
        flags.push(absolute(
            "ABS-MEDICATION-MAOI",
            Medication,
            "MAOI detected - risk of serotonin syndrome".into(),
            "Monoamine oxidase inhibitors combined with serotonergic substances carry a risk of severe serotonin syndrome. A minimum 14-day washout is required.",
            "Baseline Observations - Medication List",
            "OHA OAR 333-333-4020(3)(c); MAPS Protocol S2 §8.3.2",
        ));
    }

    if matches_any(&data.psychiatric_history, PSYCHOSIS_TERMS) {
        flags.push(absolute(
            "ABS-PSYCH-PSYCHOSIS-PERSONAL",
            Psychiatric,
            "Personal history of psychosis detected".into(),
            "A personal history of psychotic disorder is an absolute contraindication. Psychedelics may trigger acute psychotic relapse.",
            "Baseline Observations - Psychiatric History",
            "OHA OAR 333-333-4020(3)(b); MAPS Protocol S2 §8.2",
        ));
    }

    // Both terms may sit in separate entries
    if matches_any(&data.family_history, &["schizophrenia"])
        && matches_any(&data.family_history, FIRST_DEGREE_RELATIVES)
    {
        flags.push(absolute(
            "ABS-PSYCH-PSYCHOSIS-FAMILY",
            Psychiatric,
            "First-degree family history of schizophrenia detected".into(),
            "Schizophrenia in a parent or sibling significantly elevates genetic risk of psychosis.",
            "Baseline Observations - Family History",
            "OHA OAR 333-333-4020(3)(b)",
        ));
    }

    if let Some(score) = data.cssrs_score.filter(|s| *s >= CSSRS_ABSOLUTE_SCORE) {
        flags.push(absolute(
            "ABS-PSYCH-SUICIDALITY",
            Psychiatric,
            format!("Active suicidal ideation with plan detected (C-SSRS: {})", score),
            "C-SSRS of 4 or more indicates ideation with intent and plan. Activate the safety plan. The session must not proceed until the score is below threshold.",
            "Structured Safety Check - C-SSRS",
            "OHA OAR 333-333-4020(3)(a); Joint Commission NPSG 15.01.01",
        ));
    }

    if let Some(sbp) = data.last_systolic_bp.filter(|_| mdma_hypertensive(data)) {
        flags.push(absolute(
            "ABS-CARDIOVASCULAR-HTN-MDMA",
            Cardiovascular,
            format!(
                "Cardiovascular instability detected - SBP {} mmHg (MDMA session)",
                sbp
            ),
            "MDMA causes significant sympathomimetic stimulation. Systolic BP above 160 mmHg before session is an absolute contraindication. Refer to cardiology before rescheduling.",
            "Session Vitals - Blood Pressure",
            "MAPS Protocol S2 §7.4; AHA Hypertension Guidelines 2023",
        ));
    }

    if data.is_pregnant == Some(true) {
        flags.push(absolute(
            "ABS-DEMOGRAPHIC-PREGNANCY",
            Demographic,
            "Pregnancy status confirmed - session contraindicated".into(),
            "No controlled clinical data exists on psychedelic safety during pregnancy. Teratogenic risk cannot be excluded.",
            "Baseline Observations - Pregnancy Status",
            "OHA OAR 333-333-4020(3)(d)",
        ));
    }

    if let Some(age) = data.age_years.filter(|a| *a < MINIMUM_AGE_YEARS) {
        flags.push(absolute(
            "ABS-DEMOGRAPHIC-AGE",
            Demographic,
            format!("Patient age {} - below Oregon minimum (21 years)", age),
            "Oregon Measure 109 sets the minimum client age at 21. Sessions with clients under 21 are not permitted.",
            "Baseline Observations - Demographics",
            "Oregon Ballot Measure 109; OHA OAR 333-333-4010",
        ));
    }

    flags
}

// ---------------------------------------------------------------------------
// Relative rules
// ---------------------------------------------------------------------------

/// Rules that allow the session with a documented clinical justification.
pub fn check_relative_contraindications(data: &IntakeScreeningData) -> Vec<ContraindicationFlag> {
    let mut flags = Vec::new();

    if matches_any(&data.psychiatric_history, BPD_TERMS) {
        flags.push(relative(
            "REL-PSYCH-BPD",
            Psychiatric,
            "Borderline personality disorder identified".into(),
            "BPD may intensify affective responses during sessions. Heightened preparation and integration support recommended. Document clinical justification.",
            "Baseline Observations - Psychiatric History",
            "MAPS Protocol S2 §8.4",
        ));
    }

    if matches_any(&data.psychiatric_history, SUD_TERMS) {
        flags.push(relative(
            "REL-PSYCH-SUD",
            Psychiatric,
            "Active substance use disorder identified".into(),
            "Active SUD increases session safety risk. Assess sobriety duration and support system. Document clinical justification for proceeding.",
            "Baseline Observations - Psychiatric History",
            "MAPS Protocol S2 §8.5",
        ));
    }

    if data.is_mdma_session() && matches_any(&data.medications, SSRI_DRUGS) {
        flags.push(relative(
            "REL-MEDICATION-SSRI-MDMA",
            Medication,
            "SSRI detected with MDMA session - reduced efficacy and serotonin risk".into(),
            "SSRIs may blunt the MDMA effect and raise serotonin syndrome risk. Taper under physician supervision 2 weeks prior. Do not discontinue abruptly.",
            "Baseline Observations - Medication List",
            "MAPS Protocol S2 §7.2; FDA Drug Interaction Guidance",
        ));
    }

    if let Some(score) = data.phq9_score.filter(|s| *s > PHQ9_EXTREME) {
        flags.push(relative(
            "REL-ASSESSMENT-PHQ9-EXTREME",
            Assessment,
            format!("Extreme PHQ-9 severity (score: {}/27)", score),
            "PHQ-9 above 24 indicates extreme depression severity. Heightened monitoring and a crisis support plan are required.",
            "Baseline Mental Health Assessment - PHQ-9",
            "Kroenke, Spitzer & Williams (2001); MAPS Protocol S2 §8.6",
        ));
    }

    if let Some(score) = data.gad7_score.filter(|s| *s > GAD7_EXTREME) {
        flags.push(relative(
            "REL-ASSESSMENT-GAD7-EXTREME",
            Assessment,
            format!("Extreme GAD-7 severity (score: {}/21)", score),
            "GAD-7 above 18 indicates extreme anxiety. Preparation support and an anxiolytic rescue protocol should be in place.",
            "Baseline Mental Health Assessment - GAD-7",
            "Spitzer et al. (2006); MAPS Protocol S2 §8.6",
        ));
    }

    if let Some(score) = data.pcl5_score.filter(|s| *s > PCL5_EXTREME) {
        flags.push(relative(
            "REL-ASSESSMENT-PCL5-EXTREME",
            Assessment,
            format!("Extreme PTSD severity (PCL-5: {}/80)", score),
            "PCL-5 above 60 indicates extreme PTSD symptom burden. Ensure trauma-informed guide training and an integration plan.",
            "Baseline Mental Health Assessment - PCL-5",
            "Weathers et al. (2013); MAPS Protocol S2 §8.7",
        ));
    }

    if let Some(bmi) = data.bmi.filter(|b| *b < LOW_BMI) {
        flags.push(relative(
            "REL-DEMOGRAPHIC-LOW-BMI",
            Demographic,
            format!("Low BMI detected ({:.1}) - anorexia risk", bmi),
            "BMI below 17.5 may indicate a restrictive eating disorder. Nutritional and cardiological clearance recommended.",
            "Baseline Observations - Demographics (Weight/Height)",
            "DSM-5 AN Diagnostic Criteria; MAPS Protocol S2 §7.3",
        ));
    }

    // MDMA above the absolute cutoff is already blocked
    if let Some(sbp) = data.last_systolic_bp.filter(|s| *s > SYSTOLIC_RELATIVE) {
        if !mdma_hypertensive(data) {
            flags.push(relative(
                "REL-CARDIOVASCULAR-HTN",
                Cardiovascular,
                format!("Elevated blood pressure (SBP {} mmHg)", sbp),
                "Systolic BP above 150 mmHg indicates stage 2 hypertension. Physician clearance recommended. Monitor vitals every 15 minutes during session.",
                "Session Vitals - Blood Pressure",
                "AHA Hypertension Guidelines 2023; MAPS Protocol S2 §7.4",
            ));
        }
    }

    if data.is_mdma_session() && matches_any(&data.medications, STIMULANT_DRUGS) {
        flags.push(relative(
            "REL-MEDICATION-STIMULANT-MDMA",
            Medication,
            "Stimulant medication detected with MDMA session".into(),
            "Stimulant therapy with MDMA increases cardiovascular strain and serotonergic risk. Document cardiac clearance. Hold the stimulant dose on session day if the prescriber agrees.",
            "Baseline Observations - Medication List",
            "MAPS Protocol S2 §7.2",
        ));
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intake(substance: &str) -> IntakeScreeningData {
        IntakeScreeningData::new("PT-001", substance)
    }

    fn ids(flags: &[ContraindicationFlag]) -> Vec<&str> {
        flags.iter().map(|f| f.id.as_str()).collect()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn matching_is_substring_and_case_insensitive() {
        assert!(matches_any(&strings(&["Lithium Carbonate 300mg"]), &["lithium"]));
        assert!(!matches_any(&strings(&["sertraline"]), &["lithium"]));
        assert!(!matches_any(&[], &["lithium"]));
    }

    #[test]
    fn lithium_is_absolute() {
        let mut data = intake("psilocybin");
        data.medications = strings(&["lithium"]);
        let flags = check_absolute_contraindications(&data);
        assert_eq!(ids(&flags), vec!["ABS-MEDICATION-LITHIUM"]);
        assert_eq!(flags[0].severity, ContraindicationSeverity::Absolute);
        assert_eq!(flags[0].category, Medication);
    }

    #[test]
    fn maoi_brand_name_is_absolute() {
        let mut data = intake("psilocybin");
        data.medications = strings(&["Nardil 15mg"]);
        assert_eq!(ids(&check_absolute_contraindications(&data)), vec!["ABS-MEDICATION-MAOI"]);
    }

    #[test]
    fn personal_psychosis_is_absolute() {
        let mut data = intake("psilocybin");
        data.psychiatric_history = strings(&["brief psychotic episode 2019"]);
        assert_eq!(
            ids(&check_absolute_contraindications(&data)),
            vec!["ABS-PSYCH-PSYCHOSIS-PERSONAL"]
        );
    }

    #[test]
    fn family_schizophrenia_needs_first_degree_relative() {
        let mut data = intake("psilocybin");
        data.family_history = strings(&["schizophrenia (cousin)"]);
        assert!(check_absolute_contraindications(&data).is_empty());

        data.family_history = strings(&["schizophrenia", "mother"]);
        assert_eq!(
            ids(&check_absolute_contraindications(&data)),
            vec!["ABS-PSYCH-PSYCHOSIS-FAMILY"]
        );
    }

    #[test]
    fn cssrs_four_is_absolute_three_is_not() {
        let mut data = intake("psilocybin");
        data.cssrs_score = Some(3);
        assert!(check_absolute_contraindications(&data).is_empty());

        data.cssrs_score = Some(4);
        let flags = check_absolute_contraindications(&data);
        assert_eq!(ids(&flags), vec!["ABS-PSYCH-SUICIDALITY"]);
        assert!(flags[0].headline.contains("C-SSRS: 4"));
    }

    #[test]
    fn mdma_hypertension_is_absolute_and_not_relative() {
        let mut data = intake("MDMA");
        data.last_systolic_bp = Some(165.0);
        assert_eq!(
            ids(&check_absolute_contraindications(&data)),
            vec!["ABS-CARDIOVASCULAR-HTN-MDMA"]
        );
        assert!(check_relative_contraindications(&data).is_empty());
    }

    #[test]
    fn hypertension_is_relative_for_other_substances() {
        let mut data = intake("psilocybin");
        data.last_systolic_bp = Some(165.0);
        assert!(check_absolute_contraindications(&data).is_empty());
        assert_eq!(
            ids(&check_relative_contraindications(&data)),
            vec!["REL-CARDIOVASCULAR-HTN"]
        );
    }

    #[test]
    fn mdma_between_cutoffs_is_relative() {
        let mut data = intake("mdma");
        data.last_systolic_bp = Some(155.0);
        assert!(check_absolute_contraindications(&data).is_empty());
        assert_eq!(
            ids(&check_relative_contraindications(&data)),
            vec!["REL-CARDIOVASCULAR-HTN"]
        );

        data.last_systolic_bp = Some(150.0);
        assert!(check_relative_contraindications(&data).is_empty());
    }

    #[test]
    fn pregnancy_is_absolute_only_when_confirmed() {
        let mut data = intake("psilocybin");
        data.is_pregnant = Some(false);
        assert!(check_absolute_contraindications(&data).is_empty());

        data.is_pregnant = Some(true);
        assert_eq!(
            ids(&check_absolute_contraindications(&data)),
            vec!["ABS-DEMOGRAPHIC-PREGNANCY"]
        );
    }

    #[test]
    fn under_21_is_absolute() {
        let mut data = intake("psilocybin");
        data.age_years = Some(21);
        assert!(check_absolute_contraindications(&data).is_empty());

        data.age_years = Some(20);
        let flags = check_absolute_contraindications(&data);
        assert_eq!(ids(&flags), vec!["ABS-DEMOGRAPHIC-AGE"]);
        assert_eq!(flags[0].category, Demographic);
    }

    #[test]
    fn bpd_is_relative() {
        let mut data = intake("psilocybin");
        data.psychiatric_history = strings(&["Borderline Personality Disorder"]);
        let flags = check_relative_contraindications(&data);
        assert_eq!(ids(&flags), vec!["REL-PSYCH-BPD"]);
        assert_eq!(flags[0].severity, ContraindicationSeverity::Relative);
    }

    #[test]
    fn substance_use_disorder_is_relative() {
        let mut data = intake("psilocybin");
        data.psychiatric_history = strings(&["opioid use disorder, in remission"]);
        assert_eq!(ids(&check_relative_contraindications(&data)), vec!["REL-PSYCH-SUD"]);
    }

    #[test]
    fn ssri_only_flags_mdma_sessions() {
        let mut data = intake("psilocybin");
        data.medications = strings(&["sertraline 50mg"]);
        assert!(check_relative_contraindications(&data).is_empty());

        data.session_substance = "mdma".into();
        assert_eq!(
            ids(&check_relative_contraindications(&data)),
            vec!["REL-MEDICATION-SSRI-MDMA"]
        );
    }

    #[test]
    fn extreme_assessment_scores_are_relative() {
        let mut data = intake("psilocybin");
        data.phq9_score = Some(24);
        data.gad7_score = Some(18);
        data.pcl5_score = Some(60);
        assert!(check_relative_contraindications(&data).is_empty());

        data.phq9_score = Some(25);
        data.gad7_score = Some(19);
        data.pcl5_score = Some(61);
        let flags = check_relative_contraindications(&data);
        assert_eq!(
            ids(&flags),
            vec![
                "REL-ASSESSMENT-PHQ9-EXTREME",
                "REL-ASSESSMENT-GAD7-EXTREME",
                "REL-ASSESSMENT-PCL5-EXTREME",
            ]
        );
        assert!(flags.iter().all(|f| f.category == Assessment));
        assert!(flags[0].headline.contains("25/27"));
    }

    #[test]
    fn low_bmi_is_relative() {
        let mut data = intake("psilocybin");
        data.bmi = Some(17.5);
        assert!(check_relative_contraindications(&data).is_empty());

        data.bmi = Some(16.84);
        let flags = check_relative_contraindications(&data);
        assert_eq!(ids(&flags), vec!["REL-DEMOGRAPHIC-LOW-BMI"]);
        assert!(flags[0].headline.contains("(16.8)"));
    }

    #[test]
    fn stimulant_only_flags_mdma_sessions() {
        let mut data = intake("ketamine");
        data.medications = strings(&["Adderall XR"]);
        assert!(check_relative_contraindications(&data).is_empty());

        data.session_substance = "mdma".into();
        assert_eq!(
            ids(&check_relative_contraindications(&data)),
            vec!["REL-MEDICATION-STIMULANT-MDMA"]
        );
    }

    #[test]
    fn flags_never_echo_matched_text() {
        let mut data = intake("psilocybin");
        data.medications = strings(&["lithium (prescribed by Dr. Example)"]);
        let flags = check_absolute_contraindications(&data);
        assert!(!flags[0].headline.contains("Dr. Example"));
        assert!(!flags[0].detail.contains("Dr. Example"));
    }
}
