//! Shared iCalendar documents for parser, serializer, and pipeline tests.

pub(crate) const VEVENT_MINIMAL: &str = concat!(
    "BEGIN:VCALENDAR\r\n",
    "VERSION:2.0\r\n",
    "PRODID:-//Kalends//Test//EN\r\n",
    "BEGIN:VEVENT\r\n",
    "UID:minimal@example.com\r\n",
    "DTSTAMP:20260101T120000Z\r\n",
    "DTSTART:20260115T090000Z\r\n",
    "DTEND:20260115T100000Z\r\n",
    "SUMMARY:Team standup\r\n",
    "END:VEVENT\r\n",
    "END:VCALENDAR\r\n",
);

pub(crate) const VEVENT_RECURRING: &str = concat!(
    "BEGIN:VCALENDAR\r\n",
    "VERSION:2.0\r\n",
    "PRODID:-//Kalends//Test//EN\r\n",
    "BEGIN:VEVENT\r\n",
    "UID:recurring@example.com\r\n",
    "DTSTAMP:20260101T120000Z\r\n",
    "DTSTART:20260105T090000Z\r\n",
    "RRULE:FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=10\r\n",
    "EXDATE:20260107T090000Z\r\n",
    "SUMMARY:Gym\r\n",
    "END:VEVENT\r\n",
    "END:VCALENDAR\r\n",
);

pub(crate) const VTODO_BASIC: &str = concat!(
    "BEGIN:VCALENDAR\r\n",
    "VERSION:2.0\r\n",
    "PRODID:-//Kalends//Test//EN\r\n",
    "BEGIN:VTODO\r\n",
    "UID:todo@example.com\r\n",
    "DTSTAMP:20260101T120000Z\r\n",
    "DUE:20260201T170000Z\r\n",
    "SUMMARY:File the report\r\n",
    "PRIORITY:1\r\n",
    "STATUS:NEEDS-ACTION\r\n",
    "END:VTODO\r\n",
    "END:VCALENDAR\r\n",
);

pub(crate) const VJOURNAL_BASIC: &str = concat!(
    "BEGIN:VCALENDAR\r\n",
    "VERSION:2.0\r\n",
    "PRODID:-//Kalends//Test//EN\r\n",
    "BEGIN:VJOURNAL\r\n",
    "UID:journal@example.com\r\n",
    "DTSTAMP:20260101T120000Z\r\n",
    "DTSTART;VALUE=DATE:20260101\r\n",
    "SUMMARY:Day one\r\n",
    "DESCRIPTION:Kickoff notes\\, action items\\nfollow-ups.\r\n",
    "END:VJOURNAL\r\n",
    "END:VCALENDAR\r\n",
);

pub(crate) const VFREEBUSY_REQUEST: &str = concat!(
    "BEGIN:VCALENDAR\r\n",
    "VERSION:2.0\r\n",
    "PRODID:-//Kalends//Test//EN\r\n",
    "BEGIN:VFREEBUSY\r\n",
    "UID:freebusy@example.com\r\n",
    "DTSTAMP:20260101T120000Z\r\n",
    "DTSTART:20260201T000000Z\r\n",
    "DTEND:20260208T000000Z\r\n",
    "ORGANIZER:mailto:organizer@example.com\r\n",
    "FREEBUSY:20260202T090000Z/20260202T100000Z\r\n",
    "END:VFREEBUSY\r\n",
    "END:VCALENDAR\r\n",
);

pub(crate) const VEVENT_WITH_ALARM: &str = concat!(
    "BEGIN:VCALENDAR\r\n",
    "VERSION:2.0\r\n",
    "PRODID:-//Kalends//Test//EN\r\n",
    "BEGIN:VEVENT\r\n",
    "UID:alarm@example.com\r\n",
    "DTSTAMP:20260101T120000Z\r\n",
    "DTSTART:20260115T090000Z\r\n",
    "SUMMARY:Dentist\r\n",
    "BEGIN:VALARM\r\n",
    "ACTION:DISPLAY\r\n",
    "TRIGGER:-PT15M\r\n",
    "DESCRIPTION:Leave now\r\n",
    "END:VALARM\r\n",
    "END:VEVENT\r\n",
    "END:VCALENDAR\r\n",
);

pub(crate) const VEVENT_WITH_TIMEZONE: &str = concat!(
    "BEGIN:VCALENDAR\r\n",
    "VERSION:2.0\r\n",
    "PRODID:-//Kalends//Test//EN\r\n",
    "BEGIN:VTIMEZONE\r\n",
    "TZID:America/New_York\r\n",
    "BEGIN:DAYLIGHT\r\n",
    "DTSTART:19700308T020000\r\n",
    "RRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=2SU\r\n",
    "TZOFFSETFROM:-0500\r\n",
    "TZOFFSETTO:-0400\r\n",
    "TZNAME:EDT\r\n",
    "END:DAYLIGHT\r\n",
    "BEGIN:STANDARD\r\n",
    "DTSTART:19701101T020000\r\n",
    "RRULE:FREQ=YEARLY;BYMONTH=11;BYDAY=1SU\r\n",
    "TZOFFSETFROM:-0400\r\n",
    "TZOFFSETTO:-0500\r\n",
    "TZNAME:EST\r\n",
    "END:STANDARD\r\n",
    "END:VTIMEZONE\r\n",
    "BEGIN:VEVENT\r\n",
    "UID:zoned@example.com\r\n",
    "DTSTAMP:20260101T120000Z\r\n",
    "DTSTART;TZID=America/New_York:20260714T090000\r\n",
    "DTEND;TZID=America/New_York:20260714T100000\r\n",
    "SUMMARY:Client call\r\n",
    "END:VEVENT\r\n",
    "END:VCALENDAR\r\n",
);

pub(crate) const VEVENT_ALL_DAY: &str = concat!(
    "BEGIN:VCALENDAR\r\n",
    "VERSION:2.0\r\n",
    "PRODID:-//Kalends//Test//EN\r\n",
    "BEGIN:VEVENT\r\n",
    "UID:allday@example.com\r\n",
    "DTSTAMP:20260101T120000Z\r\n",
    "DTSTART;VALUE=DATE:20260301\r\n",
    "DTEND;VALUE=DATE:20260302\r\n",
    "SUMMARY:Company holiday\r\n",
    "TRANSP:TRANSPARENT\r\n",
    "END:VEVENT\r\n",
    "END:VCALENDAR\r\n",
);

pub(crate) const VEVENT_WITH_GEO: &str = concat!(
    "BEGIN:VCALENDAR\r\n",
    "VERSION:2.0\r\n",
    "PRODID:-//Kalends//Test//EN\r\n",
    "BEGIN:VEVENT\r\n",
    "UID:geo@example.com\r\n",
    "DTSTAMP:20260101T120000Z\r\n",
    "DTSTART:20260401T190000Z\r\n",
    "SUMMARY:Concert\r\n",
    "LOCATION:Shoreline Amphitheatre\r\n",
    "GEO:37.426650;-122.080925\r\n",
    "END:VEVENT\r\n",
    "END:VCALENDAR\r\n",
);

pub(crate) const VAVAILABILITY_BASIC: &str = concat!(
    "BEGIN:VCALENDAR\r\n",
    "VERSION:2.0\r\n",
    "PRODID:-//Kalends//Test//EN\r\n",
    "BEGIN:VAVAILABILITY\r\n",
    "UID:availability@example.com\r\n",
    "DTSTAMP:20260101T120000Z\r\n",
    "BUSYTYPE:BUSY-UNAVAILABLE\r\n",
    "BEGIN:AVAILABLE\r\n",
    "UID:available-1@example.com\r\n",
    "DTSTAMP:20260101T120000Z\r\n",
    "DTSTART:20260105T090000Z\r\n",
    "DTEND:20260105T170000Z\r\n",
    "RRULE:FREQ=WEEKLY;BYDAY=MO,TU,WE,TH,FR\r\n",
    "SUMMARY:Office hours\r\n",
    "END:AVAILABLE\r\n",
    "END:VAVAILABILITY\r\n",
    "END:VCALENDAR\r\n",
);
