//! SQL schema for the vetreg SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.
//!
//! Dates are `YYYY-MM-DD` text, timestamps `YYYY-MM-DD HH:MM:SS` text, so
//! range filters compare lexicographically. Money is stored in hundredths.
//! "Not in the future" checks live in `vetreg_core::rules` because SQLite does
//! not allow `date('now')` inside CHECK constraints.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS clinics (
    clinic_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL,
    address       TEXT NOT NULL UNIQUE,
    phone         TEXT NOT NULL UNIQUE,
    email         TEXT,
    website       TEXT,
    opening_date  TEXT NOT NULL,
    working_hours TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS veterinarians (
    vet_id         INTEGER PRIMARY KEY AUTOINCREMENT,
    clinic_id      INTEGER NOT NULL REFERENCES clinics(clinic_id) ON DELETE CASCADE,
    first_name     TEXT NOT NULL,
    last_name      TEXT NOT NULL,
    specialization TEXT NOT NULL,
    license_number TEXT NOT NULL UNIQUE,
    hire_date      TEXT NOT NULL,
    salary         INTEGER NOT NULL CHECK (salary > 0)   -- hundredths
);

CREATE TABLE IF NOT EXISTS owners (
    owner_id          INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name        TEXT NOT NULL,
    last_name         TEXT NOT NULL,
    phone             TEXT NOT NULL UNIQUE,
    email             TEXT,
    address           TEXT,
    registration_date TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS pets (
    pet_id            INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id          INTEGER NOT NULL REFERENCES owners(owner_id) ON DELETE CASCADE,
    name              TEXT NOT NULL,
    species           TEXT NOT NULL,
    breed             TEXT,
    birth_date        TEXT,
    gender            TEXT NOT NULL CHECK (gender IN ('M', 'F')),
    chip_number       TEXT UNIQUE,
    registration_date TEXT NOT NULL
);

-- total_visits_count is written once, in the transaction that inserts the row.
CREATE TABLE IF NOT EXISTS visits (
    visit_id           INTEGER PRIMARY KEY AUTOINCREMENT,
    pet_id             INTEGER NOT NULL REFERENCES pets(pet_id) ON DELETE CASCADE,
    vet_id             INTEGER REFERENCES veterinarians(vet_id) ON DELETE SET NULL,
    clinic_id          INTEGER REFERENCES clinics(clinic_id) ON DELETE SET NULL,
    visit_date         TEXT NOT NULL,
    diagnosis          TEXT,
    treatment          TEXT,
    cost               INTEGER CHECK (cost >= 0),            -- hundredths
    status             TEXT NOT NULL
                       CHECK (status IN ('scheduled', 'completed', 'cancelled')),
    total_visits_count INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS vaccinations (
    vaccination_id        INTEGER PRIMARY KEY AUTOINCREMENT,
    pet_id                INTEGER NOT NULL REFERENCES pets(pet_id) ON DELETE CASCADE,
    vet_id                INTEGER REFERENCES veterinarians(vet_id) ON DELETE SET NULL,
    clinic_id             INTEGER REFERENCES clinics(clinic_id) ON DELETE SET NULL,
    vaccine_name          TEXT NOT NULL,
    vaccination_date      TEXT NOT NULL,
    next_vaccination_date TEXT NOT NULL,
    batch_number          TEXT
);

CREATE INDEX IF NOT EXISTS pets_owner_idx            ON pets(owner_id);
CREATE INDEX IF NOT EXISTS veterinarians_clinic_idx  ON veterinarians(clinic_id);
CREATE INDEX IF NOT EXISTS visits_pet_idx            ON visits(pet_id);
CREATE INDEX IF NOT EXISTS visits_vet_idx            ON visits(vet_id);
CREATE INDEX IF NOT EXISTS visits_clinic_idx         ON visits(clinic_id);
CREATE INDEX IF NOT EXISTS visits_date_idx           ON visits(visit_date);
CREATE INDEX IF NOT EXISTS vaccinations_pet_idx      ON vaccinations(pet_id);
CREATE INDEX IF NOT EXISTS vaccinations_date_idx     ON vaccinations(vaccination_date);
CREATE INDEX IF NOT EXISTS vaccinations_due_idx      ON vaccinations(next_vaccination_date);

PRAGMA user_version = 1;
";

/// Demonstration data. Applied only to an empty store, inside one
/// transaction. Visit counters are written explicitly since the rows bypass
/// the store's insert path.
pub const SEED: &str = "
INSERT INTO clinics (clinic_id, name, address, phone, email, website, opening_date, working_hours) VALUES
    (1, 'Veta',        'Zelenograd, bldg 315',                '+7(904)568-90-71', NULL,              'vetaclinic-24.ru', '2010-05-15', '00:00-23:59'),
    (2, 'Funtik-Vet',  'Zelenograd, bldg 330',                '+7(499)110-95-00', NULL,              'funtik-vet.ru',    '2015-03-10', '09:00-21:00'),
    (3, 'Origami',     'Zelenograd, bldg 322A',               '+7(495)937-89-21', 'desk@origami.vet', 'origami.vet',     '2012-07-22', '00:00-23:59'),
    (4, 'Polyvet',     'Zelenograd, Panfilovsky Ave 10',      '+7(499)226-14-06', NULL,              'poli-vet.ru',      '2018-01-30', '00:00-23:59');

INSERT INTO veterinarians (vet_id, clinic_id, first_name, last_name, specialization, license_number, hire_date, salary) VALUES
    (1, 1, 'Elena',    'Poluyanova', 'Therapist',    'VET-0001', '2012-09-01', 7500000),
    (2, 1, 'Victoria', 'Rodionova',  'Therapist',    'VET-0002', '2016-02-15', 7000000),
    (3, 2, 'Alla',     'Poplavkova', 'Cardiologist', 'VET-0003', '2015-04-01', 8000000),
    (4, 3, 'Alexey',   'Lyashenko',  'Intensivist',  'VET-0004', '2013-01-10', 7200000),
    (5, 4, 'Alla',     'Filimonova', 'Surgeon',      'VET-0005', '2018-03-01', 8500000);

INSERT INTO owners (owner_id, first_name, last_name, phone, email, address, registration_date) VALUES
    (1, 'Alexander', 'Volkov',   '+79161234567', 'volkov@example.com',   'Zelenograd, Central St 10', '2020-01-15'),
    (2, 'Ekaterina', 'Zaitseva', '+79162345678', 'zaitseva@example.com', 'Zelenograd, Leningradsky Ave 25', '2019-05-20'),
    (3, 'Mikhail',   'Medvedev', '+79163456789', 'medvedev@example.com', 'Zelenograd, Sunny St 5', '2021-03-10'),
    (4, 'Olga',      'Lisitsyna','+79164567890', NULL,                   'Zelenograd, Forest St 12', '2018-07-05');

INSERT INTO pets (pet_id, owner_id, name, species, breed, birth_date, gender, chip_number, registration_date) VALUES
    (1, 1, 'Barsik', 'Cat', 'British Shorthair', '2018-05-10', 'M', '643094100000001', '2020-01-20'),
    (2, 2, 'Sharik', 'Dog', 'Labrador',          '2017-03-15', 'M', NULL,              '2019-05-25'),
    (3, 3, 'Murka',  'Cat', NULL,                '2019-07-22', 'F', NULL,              '2021-03-15'),
    (4, 4, 'Rex',    'Dog', 'Shepherd',          '2016-11-05', 'M', '643094100000004', '2018-07-10'),
    (5, 4, 'Laika',  'Dog', 'Husky',             '2019-12-03', 'F', NULL,              '2019-12-08');

INSERT INTO visits (visit_id, pet_id, vet_id, clinic_id, visit_date, diagnosis, treatment, cost, status, total_visits_count) VALUES
    (1, 1, 1, 1, '2025-01-10 10:00:00', 'Gastritis',       'Diet, medication',      250000, 'completed', 1),
    (2, 2, 3, 2, '2025-02-15 11:30:00', 'Allergy',         'Antihistamines',        180000, 'completed', 1),
    (3, 3, 4, 3, '2025-03-20 09:15:00', 'Ringworm',        'Antifungal ointment',   220000, 'completed', 1),
    (4, 4, 5, 4, '2025-04-05 14:00:00', 'Fracture',        'Cast',                  500000, 'completed', 1),
    (5, 5, 2, 1, '2025-10-15 13:45:00', 'Distemper',       'Intensive care',        600000, 'completed', 1),
    (6, 1, 1, 1, '2025-11-02 16:30:00', 'Follow-up',       NULL,                    120000, 'completed', 2);

INSERT INTO vaccinations (vaccination_id, pet_id, vet_id, clinic_id, vaccine_name, vaccination_date, next_vaccination_date, batch_number) VALUES
    (1, 1, 1, 1, 'Nobivac Tricat',    '2025-01-15', '2026-01-15', 'NT-2291'),
    (2, 2, 3, 2, 'Eurican DHPPI2-LR', '2025-02-20', '2026-02-20', NULL),
    (3, 3, 4, 3, 'Purevax RCPCh',     '2025-03-25', '2026-03-25', NULL),
    (4, 4, 5, 4, 'Vanguard 7',        '2025-11-10', '2026-11-10', 'V7-118'),
    (5, 5, 2, 1, 'Multifel-4',        '2025-12-01', '2026-12-01', NULL);
";
