use super::GuestSeed;

const fn guest(
    full_name: &'static str,
    email: &'static str,
    national_id: &'static str,
    nationality: &'static str,
    country_flag: &'static str,
) -> GuestSeed {
    GuestSeed {
        full_name,
        email,
        national_id: Some(national_id),
        nationality,
        country_flag,
    }
}

const GUESTS: &[GuestSeed] = &[
    guest("Jonas Schmedtmann", "hello@jonas.io", "3525436345", "Portugal", "https://flagcdn.com/pt.svg"),
    guest("Jonathan Smith", "johnsmith@test.eu", "4534593454", "Great Britain", "https://flagcdn.com/gb.svg"),
    guest("Jonatan Johansson", "jonatan@example.com", "9374074454", "Finland", "https://flagcdn.com/fi.svg"),
    guest("Jonas Mueller", "jonas@example.eu", "1233212288", "Germany", "https://flagcdn.com/de.svg"),
    guest("Jonas Anderson", "anderson@example.com", "0988520146", "Bolivia (Plurinational State of)", "https://flagcdn.com/bo.svg"),
    guest("Jonathan Williams", "jowi@gmail.com", "633678543", "United States of America", "https://flagcdn.com/us.svg"),
    guest("Emma Watson", "emma@gmail.com", "1234578901", "United Kingdom", "https://flagcdn.com/gb.svg"),
    guest("Mohammed Ali", "mohammedali@yahoo.com", "987543210", "Egypt", "https://flagcdn.com/eg.svg"),
    guest("Maria Rodriguez", "maria@gmail.com", "1098765321", "Spain", "https://flagcdn.com/es.svg"),
    guest("Li Mei", "li.mei@hotmail.com", "102934756", "China", "https://flagcdn.com/cn.svg"),
    guest("Khadija Ahmed", "khadija@gmail.com", "1023457890", "Sudan", "https://flagcdn.com/sd.svg"),
    guest("Gabriel Silva", "gabriel@gmail.com", "109283465", "Brazil", "https://flagcdn.com/br.svg"),
    guest("Maria Gomez", "maria@example.com", "108765421", "Mexico", "https://flagcdn.com/mx.svg"),
    guest("Ahmed Hassan", "ahmed@gmail.com", "1077777777", "Egypt", "https://flagcdn.com/eg.svg"),
    guest("John Doe", "johndoe@gmail.com", "3245908744", "United States of America", "https://flagcdn.com/us.svg"),
    guest("Fatima Ahmed", "fatima@example.com", "1234509876", "Pakistan", "https://flagcdn.com/pk.svg"),
];

pub fn guests() -> &'static [GuestSeed] {
    GUESTS
}
