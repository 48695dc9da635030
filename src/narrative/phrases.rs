//! Canned phrase inventories for narrative composition.
//!
//! Each list is a closed option set drawn from uniformly (or weighted, for
//! template-declared rules). Lists are intentionally small; variety comes
//! from combination, not volume.

pub const FIRST_NAMES_MALE: &[&str] = &[
    "James", "John", "Robert", "Michael", "William", "David", "Richard", "Thomas",
];

pub const FIRST_NAMES_FEMALE: &[&str] = &[
    "Mary",
    "Patricia",
    "Jennifer",
    "Linda",
    "Elizabeth",
    "Barbara",
    "Susan",
    "Jessica",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith",
    "Johnson",
    "Williams",
    "Brown",
    "Jones",
    "Garcia",
    "Miller",
    "Davis",
    "Rodriguez",
    "Martinez",
    "Anderson",
    "Taylor",
    "Wilson",
    "Moore",
];

pub const PHYSICIANS: &[&str] = &[
    "Dr. Smith",
    "Dr. Johnson",
    "Dr. Williams",
    "Dr. Brown",
    "Dr. Jones",
    "Dr. Garcia",
    "Dr. Miller",
    "Dr. Davis",
    "Dr. Rodriguez",
    "Dr. Martinez",
];

pub const ATTENDING_PHYSICIANS: &[&str] = &[
    "Dr. Sarah Johnson",
    "Dr. Michael Chen",
    "Dr. Emily Davis",
    "Dr. Robert Wilson",
    "Dr. Lisa Rodriguez",
    "Dr. James Anderson",
    "Dr. Maria Garcia",
    "Dr. David Kim",
];

pub const PHYSICIAN_TITLES: &[&str] = &["MD", "MD, PhD", "DO"];

pub const PHYSICIAN_SPECIALTIES: &[&str] = &[
    "Internal Medicine",
    "Family Medicine",
    "Cardiology",
    "Endocrinology",
    "Pulmonology",
];

pub const REFERRING_PROVIDERS: &[&str] = &[
    "Dr. Thompson",
    "Dr. Lee",
    "Dr. White",
    "Dr. Clark",
    "Dr. Lewis",
];

pub const PROVIDER_TITLES: &[&str] = &["MD", "DO", "NP", "PA"];

pub const REFERRING_PRACTICES: &[&str] = &[
    "Primary Care Associates",
    "Family Health Center",
    "Community Medical Group",
    "Riverside Primary Care",
    "Downtown Family Practice",
];

pub const REFERRING_ADDRESSES: &[&str] = &[
    "123 Main St, Suite 200, Anytown, ST 12345",
    "456 Oak Ave, Medical Plaza, Anytown, ST 12345",
    "789 Elm St, Anytown, ST 12345",
];

pub const STAFF_NAMES: &[&str] = &[
    "Nurse Johnson",
    "Tech Williams",
    "RN Anderson",
    "MA Thompson",
    "LPN Garcia",
];

pub const CLINIC_NAMES: &[&str] = &[
    "Main Campus Clinic",
    "Downtown Medical Center",
    "Riverside Health",
    "University Hospital",
    "Community Care Center",
    "Metropolitan Medical Clinic",
];

pub const CLINIC_ADDRESSES: &[&str] = &[
    "1000 Hospital Drive, Suite 300, Medical City, ST 12345",
    "555 Health Plaza, Anytown, ST 12345",
    "200 Wellness Way, Medical District, ST 12345",
];

pub const MEASUREMENT_LOCATIONS: &[&str] = &[
    "Exam Room 1",
    "Exam Room 2",
    "Clinic",
    "Emergency Department",
    "ICU",
];

pub const INSURERS: &[&str] = &[
    "Blue Cross Blue Shield",
    "Aetna",
    "Cigna",
    "UnitedHealthcare",
    "Medicare",
];

pub const OCCUPATIONS: &[&str] = &[
    "Teacher",
    "Engineer",
    "Nurse",
    "Accountant",
    "Retired",
    "Manager",
    "Sales",
    "Construction",
];

pub const EXERCISE_HABITS: &[&str] = &[
    "Walks 30 minutes daily",
    "Sedentary lifestyle",
    "Exercises 3x/week",
    "Active lifestyle",
    "Occasional walking",
];

pub const FAMILY_HISTORIES: &[&str] = &[
    "Father with diabetes, mother with hypertension",
    "No significant family history",
    "Mother with breast cancer, father with heart disease",
    "Diabetes and hypertension in family",
    "History of heart disease on paternal side",
];

pub const SMOKING_STATUSES: &[&str] = &[
    "Never smoker",
    "Former smoker, quit over 10 years ago",
    "Former smoker, quit last year",
    "Current smoker, counseled on cessation",
];

pub const ALCOHOL_USE: &[&str] = &[
    "Denies alcohol use",
    "Social alcohol use only",
    "1-2 drinks per week",
];

// Physical exam phrasings per body system

pub const HEENT_EXAM: &[&str] = &[
    "Normocephalic, atraumatic. PERRLA. No lymphadenopathy.",
    "Normocephalic, atraumatic. Oropharynx clear. No lymphadenopathy.",
];

pub const CV_EXAM: &[&str] = &[
    "Regular rate and rhythm. No murmurs, gallops, or rubs.",
    "RRR. Grade 2/6 systolic murmur at LUSB.",
    "Regular rate and rhythm. Normal S1, S2.",
];

pub const PULM_EXAM: &[&str] = &[
    "Clear to auscultation bilaterally.",
    "Clear bilaterally with good air movement.",
    "Mild expiratory wheeze, otherwise clear.",
];

pub const ABD_EXAM: &[&str] = &[
    "Soft, non-tender, non-distended. Normal bowel sounds.",
    "Soft and non-tender. No hepatosplenomegaly.",
];

pub const NEURO_EXAM: &[&str] = &[
    "Alert and oriented x3. Grossly intact.",
    "Alert and oriented x3. Cranial nerves II-XII intact.",
];

pub const EXT_EXAM: &[&str] = &[
    "No clubbing, cyanosis, or edema.",
    "Trace bilateral ankle edema. No clubbing or cyanosis.",
];

pub const SKIN_EXAM: &[&str] = &[
    "Warm, dry, intact. No rashes or lesions.",
    "Warm and well perfused. No concerning lesions.",
];

// Assessment and plan

pub const PMH_EXTRAS: &[&str] = &[
    "Seasonal allergies",
    "GERD",
    "Osteoarthritis",
    "Hyperlipidemia",
    "Vitamin D deficiency",
    "Chronic low back pain",
];

pub const MEDICATION_ACTIONS: &[&str] = &[
    "Continue",
    "Continue current dose of",
    "Refilled",
];

pub const FOLLOW_UP_PLANS: &[&str] = &[
    "Return to clinic in 3 months",
    "Follow up in 6 months or sooner if symptoms worsen",
    "Return in 4-6 weeks to reassess",
    "Annual follow-up unless new symptoms develop",
];

pub const LIFESTYLE_GUIDANCE: &[&str] = &[
    "Counseled on diet and regular exercise",
    "Discussed weight management and sodium restriction",
    "Encouraged smoking cessation and daily activity",
    "Reviewed home monitoring and medication adherence",
];

pub const TESTING_GENERIC: &[&str] = &[
    "CBC and CMP today",
    "Lipid panel at next visit",
    "A1c in 3 months",
    "No additional testing at this time",
];

pub const TESTING_ONCOLOGY: &[&str] = &[
    "CT chest/abdomen/pelvis for restaging",
    "CEA level drawn today",
    "Surveillance colonoscopy as scheduled",
];

// Condition narrative token options

pub const CONTROL_STATUS_DIABETES: &[&str] = &["good", "fair", "poor"];

pub const CONTROL_STATUS_HYPERTENSION: &[&str] =
    &["well-controlled", "moderately controlled", "suboptimal"];

pub const CONTROL_STATUS_ASTHMA: &[&str] =
    &["well-controlled", "partially controlled", "poorly controlled"];

pub const CONTROL_STATUS_GENERIC: &[&str] = &["stable", "improving", "suboptimal"];

pub const RESCUE_FREQUENCIES: &[&str] = &["rarely", "2-3 times per week", "daily"];

pub const SYMPTOMS_DIABETES: &[&str] = &[
    "Denies polyuria, polydipsia, or polyphagia",
    "Reports occasional increased thirst",
    "No concerning symptoms at this time",
    "Some fatigue but otherwise stable",
];

pub const SYMPTOMS_HYPERTENSION: &[&str] = &[
    "Denies chest pain, shortness of breath, or headaches",
    "Occasional mild headaches",
    "No concerning cardiovascular symptoms",
];

pub const SYMPTOMS_ASTHMA: &[&str] = &[
    "Denies wheezing or shortness of breath",
    "Occasional mild wheezing with exertion",
    "Some cough, especially at night",
];

pub const SYMPTOMS_GENERIC: &[&str] = &[
    "No acute complaints today",
    "Symptoms stable since last visit",
    "Reports feeling well overall",
];
