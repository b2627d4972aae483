pub const BEGINNER: &str = "The quick brown fox jumps over the lazy dog. Simple words help build typing confidence. Learning to type is an essential skill for everyone.";

pub const INTERMEDIATE: &str = "Programming requires attention to detail. Syntax errors can be difficult to spot sometimes. Practice makes perfect! Developing software involves multiple disciplines.";

pub const ADVANCED: &str = "The complexity of algorithms often correlates with execution time. Efficient code optimizes resource utilization while maintaining readability. Understanding Big O notation helps developers make informed decisions.";

pub const WORD_THEMES: &[&str] = &["animals", "colors", "food"];

pub const ANIMALS: [&[&str]; 3] = [
    &["cat", "dog", "cow", "pig", "fox", "bird", "fish", "frog", "lion", "bear"],
    &["rabbit", "turtle", "giraffe", "monkey", "elephant", "dolphin", "penguin", "zebra"],
    &["chimpanzee", "alligator", "rhinoceros", "hippopotamus", "hummingbird", "orangutan"],
];

pub const COLORS: [&[&str]; 3] = [
    &["red", "blue", "pink", "gray", "gold", "teal"],
    &["purple", "orange", "yellow", "violet", "maroon", "bronze"],
    &["turquoise", "lavender", "magenta", "burgundy", "chartreuse", "periwinkle"],
];

pub const FOOD: [&[&str]; 3] = [
    &["rice", "fish", "meat", "egg", "milk", "bread"],
    &["burger", "noodle", "cheese", "yogurt", "pastry", "salmon"],
    &["asparagus", "guacamole", "quesadilla", "bruschetta", "carbonara"],
];

pub const SENTENCES: [&[&str]; 3] = [
    &[
        "The quick brown fox jumps over the lazy dog.",
        "She sells seashells by the seashore.",
        "How much wood would a woodchuck chuck?",
        "All that glitters is not gold.",
        "The early bird catches the worm.",
    ],
    &[
        "Imagination is more important than knowledge because knowledge is limited.",
        "The greatest glory in living lies not in never falling, but in rising every time we fall.",
        "Life is what happens when you're busy making other plans.",
        "The way to get started is to quit talking and begin doing immediately.",
        "If you look at what you have in life, you'll always have more.",
    ],
    &[
        "The scientist's hypothesis stated that the calcium-dependent protein kinase would phosphorylate the substrate at a rate of 45 molecules per second.",
        "According to the quarterly financial report, the company's EBITDA increased by 17.3%, despite the 5.8% decrease in overall market capitalization.",
        "The blockchain algorithm implements a distributed ledger technology with cryptographic hash functions to ensure transaction immutability and network consensus.",
        "The architectural design incorporates passive solar heating, geothermal cooling systems, and photovoltaic panels to achieve net-zero energy consumption.",
        "The psychology experiment revealed that participants exhibited a statistically significant correlation between extroversion scores and reaction times (p<0.05).",
    ],
];

pub const BOMB_CODES_MEDIUM: &[&str] = &[
    "RTX492", "BCS719", "MKL365", "ZWQ801", "JHP273", "VFT528", "YGN946", "XDU137", "LOS582",
    "APE429",
];

pub const BOMB_CODES_HARD: &[&str] = &[
    "Kx7#9@Z", "Qr5$2!Y", "Jp3&8*W", "Tn1^6+M", "Bv4%0-L", "Gc2=9/F", "Hs8<3>D", "Fd6:7;A",
    "Zw9(5)P", "Lm2[4]S",
];

pub const PUNCTUATION: [&[&str]; 3] = [
    &[
        "Phone #: (555) 123-4567.",
        "25% of $80 is $20.",
        "Email me at: user@example.com",
        "Page 42, paragraph 3.",
        "Temperature: 72.5 degrees Fahrenheit.",
    ],
    &[
        "\"To be, or not to be: that is the question.\"",
        "Items needed: eggs (12), milk (1 gal.), bread ($3.50)!",
        "Visit https://www.example.com/path?query=123#fragment",
        "Formula: E = mc^2 [where m = mass]",
        "He said, \"Don't forget the semi-colons; they're important!\"",
    ],
    &[
        "function calculateArea(r) { return Math.PI * Math.pow(r, 2); }",
        "SELECT name, email FROM users WHERE age >= 18 ORDER BY name ASC;",
        "<div class=\"container\" id=\"main-content\"><!-- content goes here --></div>",
        "print(f\"Result: {x * 100:.2f}%\")",
        "git commit -m \"Fixed bug #142 (crash when $value > 100%)\"",
    ],
];
