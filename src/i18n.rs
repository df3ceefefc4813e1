//! UI text in Russian, English and Portuguese.
//!
//! Lookup falls back in two steps: the active language, then Russian (the
//! default and most complete table), then the raw key. A missing translation
//! therefore shows up as readable text instead of an error.
//!
//! Placeholders are written `{name}` and replaced by [`t`]'s params:
//!
//! ```text
//! t(Language::En, "addPhotoAdded", &[("n", "3")])  →  "3 photos added"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    En,
    Pt,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Ru, Language::En, Language::Pt];

    pub fn code(self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::En => "en",
            Language::Pt => "pt",
        }
    }

    pub fn parse(s: &str) -> Option<Language> {
        Language::ALL.into_iter().find(|l| l.code() == s)
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::Ru => RU,
            Language::En => EN,
            Language::Pt => PT,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Raw lookup in one language's table.
pub fn lookup(lang: Language, key: &str) -> Option<&'static str> {
    lang.table()
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// Translate `key`, substituting `{name}` placeholders from `params`.
pub fn t(lang: Language, key: &str, params: &[(&str, &str)]) -> String {
    let mut text = lookup(lang, key)
        .or_else(|| lookup(Language::Ru, key))
        .unwrap_or(key)
        .to_string();
    for (name, value) in params {
        text = text.replace(&format!("{{{name}}}"), value);
    }
    text
}

const RU: &[(&str, &str)] = &[
    ("loadJson", "Загрузить JSON"),
    ("addPhoto", "Добавить фото"),
    ("addPhotoAdded", "{n} фото добавлено"),
    ("sortByName", "По названию"),
    ("sortByCode", "По коду"),
    ("sortByYear", "По году"),
    ("gallery", "Галерея"),
    ("editor", "Редактор"),
    ("infographic", "Инфографика"),
    ("loadJsonPrompt", "Загрузите JSON"),
    ("link", "Ссылка"),
    ("code", "Код"),
    ("year", "Год"),
    ("file", "Файл"),
    ("errorInvalidJson", "Ошибка: неверный JSON"),
    ("catalog", "Каталог"),
    ("preview", "Превью"),
    ("name", "Название"),
    ("copyJson", "Копировать JSON"),
    ("saveJson", "Скачать JSON"),
    ("modelNamePlaceholder", "Название модели"),
    ("yearPlaceholder", "Год"),
    ("codePlaceholder", "Код"),
    ("imagePlaceholder", "0.jpg"),
    ("linkPlaceholder", "https://..."),
    ("noImage", "нет"),
    ("loadJsonFirst", "Сначала загрузите JSON"),
    ("jsonLoaded", "JSON загружен"),
    ("copiedToClipboard", "Скопировано в буфер"),
    ("fileDownloaded", "Файл скачан"),
    ("linkWord", "ССЫЛКА"),
    ("pageTitle", "Каталог"),
    ("searchPlaceholder", "Поиск: название, код, год"),
    ("searchNoResults", "Ничего не найдено"),
    ("favorites", "Избранное"),
    ("noFavorites", "В избранном пока пусто"),
    ("favoriteAdded", "Добавлено в избранное"),
    ("favoriteRemoved", "Удалено из избранного"),
    ("infographicModelCol", "Модель"),
    ("infographicChartLabel", "Моделей в год"),
    ("yearModalTitle", "Модели {year} года"),
    ("themeLight", "Светлая"),
    ("themeDark", "Тёмная"),
    ("sortAscending", "по возрастанию"),
    ("sortDescending", "по убыванию"),
];

const EN: &[(&str, &str)] = &[
    ("loadJson", "Load JSON"),
    ("addPhoto", "Add photo"),
    ("addPhotoAdded", "{n} photos added"),
    ("sortByName", "By name"),
    ("sortByCode", "By code"),
    ("sortByYear", "By year"),
    ("gallery", "Gallery"),
    ("editor", "Editor"),
    ("infographic", "Infographic"),
    ("loadJsonPrompt", "Load JSON"),
    ("link", "Link"),
    ("code", "Code"),
    ("year", "Year"),
    ("file", "File"),
    ("errorInvalidJson", "Error: invalid JSON"),
    ("catalog", "Catalog"),
    ("preview", "Preview"),
    ("name", "Name"),
    ("copyJson", "Copy JSON"),
    ("saveJson", "Download JSON"),
    ("modelNamePlaceholder", "Model name"),
    ("yearPlaceholder", "Year"),
    ("codePlaceholder", "Code"),
    ("imagePlaceholder", "0.jpg"),
    ("linkPlaceholder", "https://..."),
    ("noImage", "no"),
    ("loadJsonFirst", "Load JSON first"),
    ("jsonLoaded", "JSON loaded"),
    ("copiedToClipboard", "Copied to clipboard"),
    ("fileDownloaded", "File downloaded"),
    ("linkWord", "LINK"),
    ("pageTitle", "Catalog"),
    ("searchPlaceholder", "Search: name, code, year"),
    ("searchNoResults", "Nothing found"),
    ("favorites", "Favorites"),
    ("noFavorites", "No favorites yet"),
    ("favoriteAdded", "Added to favorites"),
    ("favoriteRemoved", "Removed from favorites"),
    ("infographicModelCol", "Model"),
    ("infographicChartLabel", "Models per year"),
    ("yearModalTitle", "Models of {year}"),
    ("themeLight", "Light"),
    ("themeDark", "Dark"),
    ("sortAscending", "ascending"),
    ("sortDescending", "descending"),
];

// The Portuguese table predates the infographic; missing keys fall back to Russian.
const PT: &[(&str, &str)] = &[
    ("loadJson", "Carregar JSON"),
    ("addPhoto", "Adicionar foto"),
    ("addPhotoAdded", "{n} fotos adicionadas"),
    ("sortByName", "Por nome"),
    ("sortByCode", "Por código"),
    ("sortByYear", "Por ano"),
    ("gallery", "Galeria"),
    ("editor", "Editor"),
    ("loadJsonPrompt", "Carregue o JSON"),
    ("link", "Link"),
    ("code", "Código"),
    ("year", "Ano"),
    ("file", "Arquivo"),
    ("errorInvalidJson", "Erro: JSON inválido"),
    ("catalog", "Catálogo"),
    ("preview", "Pré-visualização"),
    ("name", "Nome"),
    ("copyJson", "Copiar JSON"),
    ("saveJson", "Baixar JSON"),
    ("modelNamePlaceholder", "Nome do modelo"),
    ("yearPlaceholder", "Ano"),
    ("codePlaceholder", "Código"),
    ("imagePlaceholder", "0.jpg"),
    ("linkPlaceholder", "https://..."),
    ("noImage", "não"),
    ("loadJsonFirst", "Carregue o JSON primeiro"),
    ("jsonLoaded", "JSON carregado"),
    ("copiedToClipboard", "Copiado para a área de transferência"),
    ("fileDownloaded", "Arquivo baixado"),
    ("linkWord", "LINK"),
    ("pageTitle", "Catálogo"),
    ("searchPlaceholder", "Buscar: nome, código, ano"),
    ("searchNoResults", "Nada encontrado"),
    ("favorites", "Favoritos"),
    ("noFavorites", "Nenhum favorito ainda"),
    ("themeLight", "Claro"),
    ("themeDark", "Escuro"),
];
