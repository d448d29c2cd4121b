//! Built-in reference tables used when the external resources cannot be loaded.

use super::mapping::ReferenceMapping;

pub const CITY_REGIONS: &[(&str, &str)] = &[
    ("Москва", "Центральный"),
    ("Санкт-Петербург", "Северо-Западный"),
    ("Новосибирск", "Сибирский"),
    ("Екатеринбург", "Уральский"),
    ("Казань", "Приволжский"),
    ("Нижний Новгород", "Приволжский"),
    ("Челябинск", "Уральский"),
    ("Самара", "Приволжский"),
    ("Омск", "Сибирский"),
    ("Ростов-на-Дону", "Южный"),
    ("Уфа", "Приволжский"),
    ("Красноярск", "Сибирский"),
    ("Воронеж", "Центральный"),
    ("Пермь", "Приволжский"),
    ("Волгоград", "Южный"),
    ("Краснодар", "Южный"),
    ("Саратов", "Приволжский"),
    ("Тюмень", "Уральский"),
    ("Тольятти", "Приволжский"),
    ("Ижевск", "Приволжский"),
    ("Барнаул", "Сибирский"),
    ("Ульяновск", "Приволжский"),
    ("Иркутск", "Сибирский"),
    ("Хабаровск", "Дальневосточный"),
    ("Ярославль", "Центральный"),
    ("Владивосток", "Дальневосточный"),
    ("Махачкала", "Северо-Кавказский"),
    ("Томск", "Сибирский"),
    ("Оренбург", "Приволжский"),
    ("Кемерово", "Сибирский"),
    ("Новокузнецк", "Сибирский"),
    ("Рязань", "Центральный"),
    ("Астрахань", "Южный"),
    ("Пенза", "Приволжский"),
    ("Липецк", "Центральный"),
    ("Тула", "Центральный"),
    ("Киров", "Приволжский"),
    ("Чебоксары", "Приволжский"),
    ("Калининград", "Северо-Западный"),
    ("Брянск", "Центральный"),
    ("Курск", "Центральный"),
    ("Иваново", "Центральный"),
    ("Магнитогорск", "Уральский"),
    ("Тверь", "Центральный"),
    ("Ставрополь", "Северо-Кавказский"),
    ("Нижний Тагил", "Уральский"),
    ("Белгород", "Центральный"),
    ("Архангельск", "Северо-Западный"),
    ("Владимир", "Центральный"),
    ("Сочи", "Южный"),
    ("Курган", "Уральский"),
    ("Орёл", "Центральный"),
    ("Смоленск", "Центральный"),
    ("Череповец", "Северо-Западный"),
    ("Волжский", "Южный"),
    ("Мурманск", "Северо-Западный"),
    ("Якутск", "Дальневосточный"),
    ("Чита", "Дальневосточный"),
    ("Калуга", "Центральный"),
    ("Кострома", "Центральный"),
    ("Тамбов", "Центральный"),
    ("Великий Новгород", "Северо-Западный"),
    ("Псков", "Северо-Западный"),
    ("Петрозаводск", "Северо-Западный"),
    ("Сыктывкар", "Северо-Западный"),
    ("Вологда", "Северо-Западный"),
    ("Нальчик", "Северо-Кавказский"),
    ("Владикавказ", "Северо-Кавказский"),
    ("Грозный", "Северо-Кавказский"),
    ("Пятигорск", "Северо-Кавказский"),
    ("Майкоп", "Южный"),
    ("Элиста", "Южный"),
    ("Новороссийск", "Южный"),
    ("Севастополь", "Крымский"),
    ("Симферополь", "Крымский"),
    ("Набережные Челны", "Приволжский"),
    ("Йошкар-Ола", "Приволжский"),
    ("Саранск", "Приволжский"),
    ("Стерлитамак", "Приволжский"),
    ("Сургут", "Уральский"),
    ("Нижневартовск", "Уральский"),
    ("Ханты-Мансийск", "Уральский"),
    ("Салехард", "Уральский"),
    ("Абакан", "Сибирский"),
    ("Кызыл", "Сибирский"),
    ("Горно-Алтайск", "Сибирский"),
    ("Норильск", "Сибирский"),
    ("Улан-Удэ", "Дальневосточный"),
    ("Благовещенск", "Дальневосточный"),
    ("Южно-Сахалинск", "Дальневосточный"),
    ("Петропавловск-Камчатский", "Дальневосточный"),
    ("Магадан", "Дальневосточный"),
    ("Комсомольск-на-Амуре", "Дальневосточный"),
];

pub const REGION_WAREHOUSES: &[(&str, &str)] = &[
    ("Центральный", "Склад Москва"),
    ("Северо-Западный", "Склад Санкт-Петербург"),
    ("Южный", "Склад Краснодар"),
    ("Северо-Кавказский", "Склад Краснодар"),
    ("Крымский", "Склад Краснодар"),
    ("Приволжский", "Склад Казань"),
    ("Уральский", "Склад Екатеринбург"),
    ("Сибирский", "Склад Новосибирск"),
    ("Дальневосточный", "Склад Хабаровск"),
];

pub fn city_regions() -> ReferenceMapping {
    ReferenceMapping::from_pairs(CITY_REGIONS.iter().copied())
}

pub fn region_warehouses() -> ReferenceMapping {
    ReferenceMapping::from_pairs(REGION_WAREHOUSES.iter().copied())
}
