use bevstat::model::record::CountField;
use bevstat::pipeline::territory_view;
use bevstat::stats::aggregate::Granularity;
use bevstat::{map_view, AgeGroup, RawRecord};

fn main() -> anyhow::Result<()> {
    // Toy two-district table; replace with a real register extract via
    // io::register_csv::load_register.
    let mut records = Vec::new();
    let buckets = [
        ("unter 3", 120, 80),
        ("3 - 6", 110, 70),
        ("6 - 10", 140, 90),
        ("10 - 15", 180, 120),
        ("15 - 18", 90, 60),
    ];
    for (label, german, foreigner) in buckets {
        records.push(row("Vegesack (Stadtteil)", label, german, foreigner));
        records.push(row("Burglesum (Stadtteil)", label, german / 2, foreigner / 2));
    }

    let view = territory_view(&records, "Vegesack (Stadtteil)")?;

    println!("territory: {}", view.territorial_unit);
    println!("age_group,population_total,percentage_population_total");
    for r in &view.rows {
        println!(
            "{},{},{:.2}",
            r.record.age_group,
            r.record.count(CountField::PopulationTotal),
            r.percentage(CountField::PopulationTotal),
        );
    }

    for field in CountField::ALL {
        let marker = view
            .median(field)
            .map(AgeGroup::to_string)
            .unwrap_or_else(|| "-".to_string());
        println!("median {}: {}", field.name(), marker);
    }

    println!();
    println!("unit,join_key,population_total,percentage_foreigner");
    for unit in map_view(&records, Granularity::Stadtteil)? {
        println!(
            "{},{},{},{:.2}",
            unit.territorial_unit,
            unit.join_key,
            unit.count(CountField::PopulationTotal),
            unit.percentage_foreigner,
        );
    }

    Ok(())
}

fn row(unit: &str, age_label: &str, german: u64, foreigner: u64) -> RawRecord {
    let total = german + foreigner;
    // roughly even gender split, remainder to female
    let male = total / 2;
    RawRecord {
        territory_key: "041".to_string(),
        territorial_unit: unit.to_string(),
        date: "31.12.2023".to_string(),
        age_group: AgeGroup::parse(age_label),
        counts: [
            total,
            male,
            total - male,
            german,
            german / 2,
            german - german / 2,
            foreigner,
            foreigner / 2,
            foreigner - foreigner / 2,
        ],
    }
}
