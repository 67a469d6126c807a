//! Static state → district table backing every state/district control.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistrictOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateOption {
    pub value: &'static str,
    pub label: &'static str,
    pub districts: &'static [DistrictOption],
}

pub const DEFAULT_STATE: &str = "bihar";

const fn d(value: &'static str, label: &'static str) -> DistrictOption {
    DistrictOption { value, label }
}

const BIHAR_DISTRICTS: &[DistrictOption] = &[
    d("araria", "अररिया | Araria"),
    d("arwal", "अरवल | Arwal"),
    d("aurangabad", "औरंगाबाद | Aurangabad"),
    d("banka", "बांका | Banka"),
    d("begusarai", "बेगूसराय | Begusarai"),
    d("bhagalpur", "भागलपुर | Bhagalpur"),
    d("bhojpur", "भोजपुर | Bhojpur"),
    d("buxar", "बक्सर | Buxar"),
    d("darbhanga", "दरभंगा | Darbhanga"),
    d("east-champaran", "पूर्वी चंपारण | East Champaran"),
    d("gaya", "गया | Gaya"),
    d("gopalganj", "गोपालगंज | Gopalganj"),
    d("jamui", "जमुई | Jamui"),
    d("jehanabad", "जहानाबाद | Jehanabad"),
    d("kaimur", "कैमूर | Kaimur"),
    d("katihar", "कटिहार | Katihar"),
    d("khagaria", "खगड़िया | Khagaria"),
    d("kishanganj", "किशनगंज | Kishanganj"),
    d("lakhisarai", "लखीसराय | Lakhisarai"),
    d("madhepura", "मधेपुरा | Madhepura"),
    d("madhubani", "मधुबनी | Madhubani"),
    d("munger", "मुंगेर | Munger"),
    d("muzaffarpur", "मुजफ्फरपुर | Muzaffarpur"),
    d("nalanda", "नालंदा | Nalanda"),
    d("nawada", "नवादा | Nawada"),
    d("patna", "पटना | Patna"),
    d("purnia", "पूर्णिया | Purnia"),
    d("rohtas", "रोहतास | Rohtas"),
    d("saharsa", "सहरसा | Saharsa"),
    d("samastipur", "समस्तीपुर | Samastipur"),
    d("saran", "सारण | Saran"),
    d("sheikhpura", "शेखपुरा | Sheikhpura"),
    d("sheohar", "शिवहर | Sheohar"),
    d("sitamarhi", "सीतामढ़ी | Sitamarhi"),
    d("siwan", "सीवान | Siwan"),
    d("supaul", "सुपौल | Supaul"),
    d("vaishali", "वैशाली | Vaishali"),
    d("west-champaran", "पश्चिमी चंपारण | West Champaran"),
];

const JHARKHAND_DISTRICTS: &[DistrictOption] = &[
    d("bokaro", "बोकारो | Bokaro"),
    d("chatra", "चतरा | Chatra"),
    d("deoghar", "देवघर | Deoghar"),
    d("dhanbad", "धनबाद | Dhanbad"),
    d("dumka", "दुमका | Dumka"),
    d("east-singhbhum", "पूर्वी सिंहभूम | East Singhbhum"),
    d("garhwa", "गढ़वा | Garhwa"),
    d("giridih", "गिरिडीह | Giridih"),
    d("godda", "गोड्डा | Godda"),
    d("gumla", "गुमला | Gumla"),
    d("hazaribagh", "हजारीबाग | Hazaribagh"),
    d("jamtara", "जामताड़ा | Jamtara"),
    d("khunti", "खूंटी | Khunti"),
    d("koderma", "कोडरमा | Koderma"),
    d("latehar", "लातेहार | Latehar"),
    d("lohardaga", "लोहरदगा | Lohardaga"),
    d("pakur", "पाकुड़ | Pakur"),
    d("palamu", "पलामू | Palamu"),
    d("ramgarh", "रामगढ़ | Ramgarh"),
    d("ranchi", "रांची | Ranchi"),
    d("sahebganj", "साहिबगंज | Sahebganj"),
    d("seraikela-kharsawan", "सरायकेला खरसावां | Seraikela Kharsawan"),
    d("simdega", "सिमडेगा | Simdega"),
    d("west-singhbhum", "पश्चिमी सिंहभूम | West Singhbhum"),
];

pub const STATES: &[StateOption] = &[
    StateOption {
        value: "bihar",
        label: "बिहार | Bihar",
        districts: BIHAR_DISTRICTS,
    },
    StateOption {
        value: "jharkhand",
        label: "झारखंड | Jharkhand",
        districts: JHARKHAND_DISTRICTS,
    },
];

pub fn state(value: &str) -> Option<&'static StateOption> {
    STATES.iter().find(|s| s.value == value)
}

pub fn districts_of(state_value: &str) -> &'static [DistrictOption] {
    state(state_value).map(|s| s.districts).unwrap_or(&[])
}
