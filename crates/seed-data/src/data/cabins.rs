use super::CabinSeed;

const CABINS: &[CabinSeed] = &[
    CabinSeed {
        name: "001",
        max_capacity: 2,
        regular_price: 250,
        discount: 0,
        description: "Discover the ultimate luxury getaway for couples in the cozy wooden cabin 001. Nestled in a picturesque forest, this stunning cabin offers a secluded and intimate retreat.",
        image: "cabin-001.jpg",
    },
    CabinSeed {
        name: "002",
        max_capacity: 2,
        regular_price: 350,
        discount: 25,
        description: "Escape to the serenity of nature and indulge in luxury in our cozy cabin 002. Perfect for couples, this cabin offers a secluded and intimate retreat in the heart of a picturesque forest.",
        image: "cabin-002.jpg",
    },
    CabinSeed {
        name: "003",
        max_capacity: 4,
        regular_price: 300,
        discount: 0,
        description: "Experience luxury family living in our medium-sized wooden cabin 003. Designed to comfortably accommodate up to 4 people, this cabin offers a secluded retreat in the heart of the forest.",
        image: "cabin-003.jpg",
    },
    CabinSeed {
        name: "004",
        max_capacity: 4,
        regular_price: 500,
        discount: 50,
        description: "Indulge in the ultimate luxury family vacation in this medium-sized cabin 004. Designed for families of up to 4, this cabin offers a sumptuous retreat for the discerning traveler.",
        image: "cabin-004.jpg",
    },
    CabinSeed {
        name: "005",
        max_capacity: 6,
        regular_price: 350,
        discount: 0,
        description: "Enjoy a comfortable and cozy getaway with your group or family in our spacious cabin 005. Designed to accommodate up to 6 people, this cabin offers a secluded retreat in the heart of nature.",
        image: "cabin-005.jpg",
    },
    CabinSeed {
        name: "006",
        max_capacity: 6,
        regular_price: 800,
        discount: 100,
        description: "Experience the epitome of luxury with your group or family in our spacious wooden cabin 006. Designed to comfortably accommodate up to 6 people, this cabin offers a lavish retreat in the heart of nature.",
        image: "cabin-006.jpg",
    },
    CabinSeed {
        name: "007",
        max_capacity: 8,
        regular_price: 600,
        discount: 100,
        description: "Accommodate your large group or multiple families in the spacious and grand wooden cabin 007. Designed to comfortably fit up to 8 people, this cabin offers a secluded retreat in the heart of beautiful forests and mountains.",
        image: "cabin-007.jpg",
    },
    CabinSeed {
        name: "008",
        max_capacity: 10,
        regular_price: 1400,
        discount: 0,
        description: "Experience the epitome of luxury and grandeur with your large group or multiple families in our grand cabin 008. This cabin offers a lavish retreat that caters to every need and desire.",
        image: "cabin-008.jpg",
    },
];

pub fn cabins() -> &'static [CabinSeed] {
    CABINS
}
