use chrono::Utc;
use dayline::{
    Clock, Contact, Coordinate, DayLine, Instant, LineStyle, PathSegment, SpaProvider,
    TickingClock, UtcOffset,
};

fn main() -> dayline::Result<()> {
    env_logger::init();

    let viewer = UtcOffset::new(2 * 3600)?;
    let line = DayLine::new(SpaProvider::default(), LineStyle::default(), viewer)?;

    let contacts = [
        Contact::new("Ada", UtcOffset::new(3600)?)
            .with_location("London", Coordinate::new(51.51, -0.13)?),
        Contact::new("Kai", UtcOffset::new(9 * 3600)?)
            .with_location("Tokyo", Coordinate::new(35.68, 139.69)?),
        Contact::new("Office", UtcOffset::new(-4 * 3600)?).with_working_hours(),
        Contact::new("Station", UtcOffset::new(3600)?)
            .with_location("Svalbard", Coordinate::new(78.22, 15.65)?),
    ];

    let clock = TickingClock::default();
    let now = clock.now();
    println!("now: {now}");

    for contact in &contacts {
        let model = line.render(contact, 320.0, 60.0, now);
        let curves = model
            .curve
            .segments()
            .iter()
            .filter(|s| matches!(s, PathSegment::CurveTo { .. }))
            .count();
        println!(
            "{:<8} {:>8} {:>7}  marker=({:.1}, {:.1})  label=({:.1}, {:.1})  curves={curves}",
            contact.name,
            model.label_text,
            model.time_difference,
            model.marker.x,
            model.marker.y,
            model.label.x,
            model.label.y,
        );
    }

    // Drag the first row to its three-quarter mark, then let go.
    let frame = line.style().line_frame(320.0, 60.0);
    let scrubbed: Instant = line.scrub(&clock, &contacts[0], frame, frame.x_at(0.75));
    println!("scrubbed to {scrubbed} (live {})", Instant::from_utc(Utc::now()));
    line.release(&clock);

    Ok(())
}
